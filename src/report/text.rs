use crate::core::aggregate::{BarSeries, PieChart, ScatterSeries};
use crate::core::pipeline::Analysis;
use crate::models::metric::Metric;
use crate::utils::colors::{GREY, color_for_days, color_for_series, paint};
use crate::utils::formatting::{bar, days2readable, label_or_dash, percent};
use crate::utils::table::{Column, Table, TableCell};
use std::fmt::Write;

const BAR_WIDTH: usize = 30;

/// Terminal rendering of the four dashboard views.
pub fn render_text(analysis: &Analysis, color: bool) -> String {
    let mut out = String::new();

    section(&mut out, "Case Processing: PlusOne vs Gustave Time");
    for metric in Metric::ALL {
        let pair = analysis.selection.pair(metric);
        let _ = writeln!(out, "{}: {} → {}", metric.display_name(), pair.start, pair.end);
    }
    out.push('\n');
    out.push_str(&cases_table(analysis, color));

    section(&mut out, "Per-case durations (days)");
    out.push_str(&bar_chart(&analysis.bar, color));

    for metric in Metric::ALL {
        if let Some(pie) = analysis.pie(metric) {
            section(&mut out, &format!("Distribution of {}", metric.display_name()));
            out.push_str(&distribution(pie, color));
        }
    }

    section(&mut out, "PlusOne Time vs Gustave Time");
    out.push_str(&scatter(&analysis.scatter, color));

    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n====================== {title}\n");
}

fn cases_table(analysis: &Analysis, color: bool) -> String {
    let mut t = Table::new(
        vec![
            Column::left("NAME"),
            Column::right("PLUSONE"),
            Column::right("GUSTAVE"),
            Column::left("PLUSONE RANGE"),
            Column::left("GUSTAVE RANGE"),
        ],
        color,
    );

    for row in &analysis.rows {
        t.add_row(vec![
            TableCell::plain(row.name.clone()),
            TableCell::colored(days2readable(row.plusone_time), color_for_days(row.plusone_time)),
            TableCell::colored(days2readable(row.gustave_time), color_for_days(row.gustave_time)),
            TableCell::plain(label_or_dash(row.plusone_bucket)),
            TableCell::plain(label_or_dash(row.gustave_bucket)),
        ]);
    }

    t.render()
}

/// Grouped horizontal bars. Bar length follows the axis range, the printed
/// number is always the real value.
fn bar_chart(series: &BarSeries, color: bool) -> String {
    let mut out = String::new();
    let axis = series.axis;
    let span = axis.span();

    let _ = writeln!(out, "axis {}..{} (tick {})", axis.min, axis.max, axis.tick);

    let name_width = series
        .points
        .iter()
        .map(|p| unicode_width::UnicodeWidthStr::width(p.name.as_str()))
        .max()
        .unwrap_or(0);

    for point in &series.points {
        let values = [point.plusone_time, point.gustave_time];
        for (i, value) in values.iter().enumerate() {
            let name = if i == 0 { point.name.as_str() } else { "" };
            let tag = if i == 0 { "P" } else { "G" };
            let drawn = value
                .map(|v| bar(axis.clamp(v).saturating_sub(axis.min), span, BAR_WIDTH))
                .unwrap_or_default();
            let drawn = if color {
                paint(&drawn, color_for_series(i))
            } else {
                drawn
            };
            let number = days2readable(*value);
            let number = if color {
                paint(&number, color_for_days(*value))
            } else {
                number
            };
            let pad = name_width.saturating_sub(unicode_width::UnicodeWidthStr::width(name));
            let _ = writeln!(out, "{name}{} {tag} |{drawn} {number}", " ".repeat(pad));
        }
    }

    out
}

fn distribution(pie: &PieChart, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}\n", pie.title);

    let mut t = Table::new(
        vec![
            Column::left("RANGE"),
            Column::right("CASES"),
            Column::right("SHARE"),
            Column::left(""),
        ],
        color,
    );

    let max = pie.slices.iter().map(|s| s.count).max().unwrap_or(0) as i64;
    for slice in pie.slices.iter().filter(|s| s.count > 0) {
        t.add_row(vec![
            TableCell::plain(slice.label.label()),
            TableCell::plain(slice.count.to_string()),
            TableCell::plain(percent(slice.count, pie.total)),
            TableCell::colored(
                bar(slice.count as i64, max, BAR_WIDTH),
                color_for_series(pie.metric as usize),
            ),
        ]);
    }

    if pie.total == 0 {
        out.push_str("No cases with a computable duration.\n");
    } else {
        out.push_str(&t.render());
        let _ = writeln!(out, "total: {}", pie.total);
    }

    if pie.excluded > 0 {
        let line = format!("{} case(s) excluded (missing or unusable dates)", pie.excluded);
        let _ = writeln!(out, "{}", if color { paint(&line, GREY) } else { line });
    }

    out
}

fn scatter(series: &ScatterSeries, color: bool) -> String {
    let mut out = String::new();

    let mut t = Table::new(
        vec![
            Column::left("NAME"),
            Column::right(&series.x_label),
            Column::right(&series.y_label),
        ],
        color,
    );

    for p in &series.points {
        t.add_row(vec![
            TableCell::plain(p.name.clone()),
            TableCell::colored(p.x.to_string(), color_for_days(Some(p.x))),
            TableCell::colored(p.y.to_string(), color_for_days(Some(p.y))),
        ]);
    }

    if series.points.is_empty() {
        out.push_str("No cases with both durations.\n");
    } else {
        out.push_str(&t.render());
    }

    if series.excluded > 0 {
        let line = format!("{} case(s) not plotted", series.excluded);
        let _ = writeln!(out, "{}", if color { paint(&line, GREY) } else { line });
    }

    out
}
