use crate::core::pipeline::Analysis;
use crate::errors::{AppError, AppResult};

/// Pretty-printed JSON of the whole analysis (missing values as `null`).
pub fn render_json(analysis: &Analysis) -> AppResult<String> {
    serde_json::to_string_pretty(analysis)
        .map_err(|e| AppError::Render(format!("JSON serialization error: {e}")))
}
