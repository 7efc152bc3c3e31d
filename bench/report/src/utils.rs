use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Fixed-decimal label, e.g. `0.12346` for 5 decimals. Precision beyond
/// `decimals` is lost when the label is parsed back.
pub fn format_value(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// DOM-safe identifier for an arbitrary bench/test name.
pub fn element_id(name: &str) -> String {
    URL_SAFE_NO_PAD.encode(name.as_bytes())
}
