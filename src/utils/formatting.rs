//! Formatting utilities used for report outputs.

/// `5` → "5", missing → "--"
pub fn days2readable(days: Option<i64>) -> String {
    match days {
        Some(d) => d.to_string(),
        None => "--".to_string(),
    }
}

pub fn label_or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "--".to_string())
}

/// Share of `part` in `total` as "42.9%".
pub fn percent(part: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", part as f64 * 100.0 / total as f64)
}

/// Horizontal bar of `value` out of `max`, at most `width` cells long.
pub fn bar(value: i64, max: i64, width: usize) -> String {
    if value <= 0 || max <= 0 {
        return String::new();
    }
    let cells = ((value as f64 / max as f64) * width as f64).round() as usize;
    "█".repeat(cells.clamp(1, width))
}
