//! Presentation of the analysis: terminal tables or JSON for an external
//! charting surface.

mod columns;
mod json;
mod text;

pub use columns::render_columns;
pub use json::render_json;
pub use text::render_text;

use crate::core::pipeline::Analysis;
use crate::errors::AppResult;
use clap::ValueEnum;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    pub fn rf_from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Render `analysis` in the requested format.
pub fn render(analysis: &Analysis, format: ReportFormat, color: bool) -> AppResult<String> {
    match format {
        ReportFormat::Text => Ok(render_text(analysis, color)),
        ReportFormat::Json => render_json(analysis),
    }
}
