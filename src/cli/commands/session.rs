//! Line-oriented interactive session.
//!
//! Each command changes the session state (loaded file, selection) and the
//! whole pipeline is recomputed on `show`. A failing command is reported and
//! the session goes on.

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::Session;
use crate::errors::{AppError, AppResult};
use crate::models::metric::Metric;
use crate::report::{ReportFormat, render, render_columns};
use crate::ui::messages::error;
use crate::utils::path::expand_tilde;
use std::io::{self, BufRead, IsTerminal, Write};

const HELP: &str = "\
Commands:
  load <path>                          load (or reload) a case CSV file
  columns                              list the columns of the loaded file
  select <plusone|gustave> <start> <end>
                                       choose the date columns of a metric
                                       (quote names with spaces: \"Start Date\")
  reset                                back to the default columns
  show [text|json]                     recompute and show the dashboard
  help                                 this text
  quit                                 leave the session";

enum Flow {
    Continue,
    Quit,
}

pub fn handle(cmd: &Commands, cfg: &Config, color: bool) -> AppResult<()> {
    if let Commands::Session { file } = cmd {
        let mut session = Session::new(cfg.clone())?;
        let stdout = io::stdout();
        let mut out = stdout.lock();

        if let Some(f) = file {
            // reported like an in-session `load`; the session still starts
            if let Err(e) = load(&mut session, f, &mut out) {
                error(e);
            }
        }

        let stdin = io::stdin();
        let prompt = stdin.is_terminal();
        run(&mut session, stdin.lock(), &mut out, color, prompt)?;
    }
    Ok(())
}

/// Read commands from `input` until EOF or `quit`.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    color: bool,
    prompt: bool,
) -> AppResult<()> {
    if prompt {
        writeln!(out, "caseboard session, type `help` for commands")?;
        write!(out, "> ")?;
        out.flush()?;
    }

    for line in input.lines() {
        let line = line?;

        match execute(session, line.trim(), out, color) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => error(e),
        }

        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
    }

    Ok(())
}

fn load<W: Write>(session: &mut Session, path: &str, out: &mut W) -> AppResult<()> {
    let hits = session.cache().hits();
    let table = session.load_path(&expand_tilde(path))?;
    let (rows, cols) = (table.len(), table.columns().len());
    let cached = if session.cache().hits() > hits {
        " (unchanged, cached)"
    } else {
        ""
    };
    writeln!(out, "Loaded {path}: {rows} rows, {cols} columns{cached}")?;
    Ok(())
}

fn execute<W: Write>(session: &mut Session, line: &str, out: &mut W, color: bool) -> AppResult<Flow> {
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let args = || {
        shlex::split(rest)
            .ok_or_else(|| AppError::InvalidCommand(format!("unbalanced quotes: {rest}")))
    };

    match verb.to_lowercase().as_str() {
        "" => {}
        v if v.starts_with('#') => {}

        "load" => {
            if rest.is_empty() {
                return Err(AppError::InvalidCommand("usage: load <path>".into()));
            }
            // a single quoted token is unwrapped, anything else is taken as typed
            let path = match shlex::split(rest).as_deref() {
                Some([single]) => single.clone(),
                _ => rest.to_string(),
            };
            load(session, &path, out)?;
        }

        "columns" => {
            write!(out, "{}", render_columns(session.table()?, color))?;
        }

        "select" => {
            let args = args()?;
            let [metric, start, end] = args.as_slice() else {
                return Err(AppError::InvalidCommand(
                    "usage: select <plusone|gustave> <start> <end> (quote names with spaces)".into(),
                ));
            };
            let metric =
                Metric::m_from_str(metric).ok_or_else(|| AppError::UnknownMetric(metric.clone()))?;
            let selection = session.select(metric, Some(start.clone()), Some(end.clone()))?;
            let pair = selection.pair(metric);
            writeln!(out, "{}: {} → {}", metric.display_name(), pair.start, pair.end)?;
        }

        "reset" => {
            session.reset_selection();
            writeln!(out, "Selection reset to defaults")?;
        }

        "show" => {
            let args = args()?;
            let format = match args.first() {
                None => ReportFormat::Text,
                Some(f) => ReportFormat::rf_from_str(f)
                    .ok_or_else(|| AppError::InvalidCommand(format!("unknown format: {f}")))?,
            };
            let analysis = session.analysis()?;
            let color = color && format == ReportFormat::Text;
            writeln!(out, "{}", render(&analysis, format, color)?)?;
        }

        "help" => writeln!(out, "{HELP}")?,

        "quit" | "exit" => return Ok(Flow::Quit),

        other => return Err(AppError::InvalidCommand(format!("{other} (try `help`)"))),
    }

    Ok(Flow::Continue)
}
