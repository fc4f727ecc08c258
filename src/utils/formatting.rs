const MS_PER_HOUR: u64 = 60 * 60 * 1000;

/// Millisecond epoch timestamps as seconds, the way the API logs them.
pub(crate) fn format_timestamp(ms: Option<i64>) -> String {
    match ms {
        Some(ms) if ms >= 0 => format!("{}", ms / 1000),
        _ => "-".to_string(),
    }
}

pub(crate) fn format_retention(ms: Option<u64>) -> String {
    match ms {
        Some(ms) if ms % MS_PER_HOUR == 0 => format!("{} h", ms / MS_PER_HOUR),
        Some(ms) => format!("{:.1} h", ms as f64 / MS_PER_HOUR as f64),
        None => "-".to_string(),
    }
}

pub(crate) fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}
