use crate::cli::parser::Commands;
use crate::config::{Config, parse_delimiter};
use crate::core::session::Session;
use crate::errors::AppResult;
use crate::report::render_columns;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config, color: bool) -> AppResult<()> {
    if let Commands::Columns { file, delimiter } = cmd {
        let mut session = Session::new(cfg.clone())?;
        if let Some(d) = delimiter {
            session = session.with_delimiter(parse_delimiter(d)?);
        }

        let table = session.load_path(&expand_tilde(file))?;
        print!("{}", render_columns(table, color));
    }
    Ok(())
}
