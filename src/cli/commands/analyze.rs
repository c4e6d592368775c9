use crate::cli::parser::Commands;
use crate::config::{Config, parse_delimiter};
use crate::core::session::Session;
use crate::errors::AppResult;
use crate::models::metric::Metric;
use crate::report::{ReportFormat, render};
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;

/// Handle the `analyze` command: one full pipeline pass on a file.
pub fn handle(cmd: &Commands, cfg: &Config, color: bool) -> AppResult<()> {
    if let Commands::Analyze {
        file,
        plusone_start,
        plusone_end,
        gustave_start,
        gustave_end,
        negative_policy,
        format,
        delimiter,
    } = cmd
    {
        let mut session = Session::new(cfg.clone())?;
        if let Some(d) = delimiter {
            session = session.with_delimiter(parse_delimiter(d)?);
        }
        if let Some(policy) = negative_policy {
            session = session.with_negative_policy(*policy);
        }

        session.load_path(&expand_tilde(file))?;
        session.select(Metric::PlusOne, plusone_start.clone(), plusone_end.clone())?;
        session.select(Metric::Gustave, gustave_start.clone(), gustave_end.clone())?;

        let analysis = session.analysis()?;

        if analysis.rows.is_empty() {
            warning("The dataset has no cases.");
        }

        let color = color && *format == ReportFormat::Text;
        println!("{}", render(&analysis, *format, color)?);
    }
    Ok(())
}
