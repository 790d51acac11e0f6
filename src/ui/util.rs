use rust_decimal::Decimal;

/// Format an amount in rubles with space-grouped thousands. Kopecks are shown
/// only when non-zero, after a comma.
/// e.g. `10000` → `"10 000 ₽"`, `-1240.5` → `"-1 240,50 ₽"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let abs = val.abs().round_dp(2);
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let grouped: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ");

    let sign = if val < Decimal::ZERO { "-" } else { "" };
    if dec_part == "00" {
        format!("{sign}{grouped} ₽")
    } else {
        format!("{sign}{grouped},{dec_part} ₽")
    }
}

/// Like [`format_amount`] but always signed, for history rows.
pub(crate) fn format_signed(val: Decimal) -> String {
    if val > Decimal::ZERO {
        format!("+{}", format_amount(val))
    } else {
        format_amount(val)
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// The result is guaranteed to be at most `max` characters (counting "…" as one).
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}
