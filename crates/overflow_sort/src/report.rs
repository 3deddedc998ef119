use std::fmt::Write;
use std::time::Duration;

/// Renders `[a, b, c]`, cutting off after `limit` items with `...`.
pub fn format_sequence(values: &[u64], limit: usize) -> String {
    let mut out = String::from("[");
    for (i, value) in values.iter().take(limit).enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{value}");
    }
    if values.len() > limit {
        out.push_str(if limit == 0 { "..." } else { ", ..." });
    }
    out.push(']');
    out
}

pub fn render_report(original: &[u64], sorted: &[u64], elapsed: Duration, limit: usize) -> String {
    format!(
        "Original: {}\nSorted by recursive overflow: {}\nElapsed time: {:.6} seconds\n",
        format_sequence(original, limit),
        format_sequence(sorted, limit),
        elapsed.as_secs_f64(),
    )
}
