//! Display helpers for prices and durations (pt-BR)

/// Format an amount as Brazilian reais, for example `R$ 1.234,56`.
///
/// Rounds to centavos. Negative amounts carry a leading minus (`-R$ 5,00`) and
/// non-finite values format as zero.
pub fn format_price(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}R$ {},{:02}",
        sign,
        group_thousands(cents / 100),
        cents % 100
    )
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Format a duration in minutes: `45 min`, `2h` or `1h 30min`.
///
/// Fractions are rounded to the nearest minute; negative values count as zero.
pub fn format_time(minutes: f64) -> String {
    let total = if minutes.is_finite() {
        minutes.max(0.0).round() as u64
    } else {
        0
    };
    if total < 60 {
        return format!("{} min", total);
    }
    let hours = total / 60;
    let rest = total % 60;
    if rest == 0 {
        format!("{}h", hours)
    } else {
        format!("{}h {}min", hours, rest)
    }
}
