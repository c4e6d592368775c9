use crate::core::coerce::count_dates;
use crate::models::table::CaseTable;
use crate::utils::colors::{GREEN, GREY};
use crate::utils::table::{Column, Table, TableCell};

/// Header overview: type of each column and how many values read as dates.
pub fn render_columns(table: &CaseTable, color: bool) -> String {
    let mut t = Table::new(
        vec![
            Column::left("#"),
            Column::left("COLUMN"),
            Column::left("TYPE"),
            Column::right("DATES"),
            Column::right("MISSING"),
        ],
        color,
    );

    for (i, name) in table.columns().iter().enumerate() {
        let is_date = table.is_date_column(i);
        let dates = count_dates(table, i);
        let missing = table.column_cells(i).filter(|c| c.is_missing()).count();

        t.add_row(vec![
            TableCell::plain((i + 1).to_string()),
            TableCell::plain(name.clone()),
            if is_date {
                TableCell::colored("date", GREEN)
            } else {
                TableCell::colored("raw", GREY)
            },
            TableCell::plain(format!("{dates}/{}", table.len())),
            TableCell::plain(missing.to_string()),
        ]);
    }

    let mut out = format!("{} rows, {} columns\n\n", table.len(), table.columns().len());
    out.push_str(&t.render());
    out
}
