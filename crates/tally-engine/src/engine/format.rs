use super::value::Value;

/// Text shown in place of content too wide for its column.
pub const OVERFLOW: &str = "###";

/// Format a value as plain text (used for evaluated export).
pub fn format_value(value: &Value, bar_width: usize) -> String {
    match value {
        Value::Int(n) => n.to_string(),
        Value::Float(n) => format_float(*n),
        Value::Str(s) => s.clone(),
        Value::Bar(bar) => bar.render(bar_width),
        Value::Empty => String::new(),
        Value::Error(err) => err.to_string(),
    }
}

/// Shortest round-trip spelling of a float, always marked as a float
/// (`6.0`, not `6`), switching to exponent form for very large or small magnitudes.
pub fn format_float(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = n.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return with_signed_exponent(&format!("{:e}", n));
    }

    let s = n.to_string();
    if s.contains('.') { s } else { format!("{}.0", s) }
}

/// `%g`-style formatting with `precision` significant digits.
pub fn format_general(n: f64, precision: usize) -> String {
    let precision = precision.max(1);
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if n == 0.0 {
        return if n.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let scientific = format!("{:.*e}", precision - 1, n);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        with_signed_exponent(&format!("{}e{}", strip_fraction_zeros(mantissa), exponent))
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        strip_fraction_zeros(&format!("{:.*}", decimals, n)).to_string()
    }
}

fn strip_fraction_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Rewrite Rust's `1.5e7` exponent spelling as `1.5e+07`.
fn with_signed_exponent(s: &str) -> String {
    match s.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => s.to_string(),
    }
}

/// Render a value into a fixed-width grid cell.
///
/// Numbers are right-aligned in general format, text is left-aligned and
/// anything wider than the cell is replaced by `###`.
pub fn render_cell(value: &Value, width: usize) -> String {
    let precision = width.saturating_sub(2).min(6);
    match value {
        Value::Int(n) => align_right(&format_general(*n as f64, precision), width),
        Value::Float(n) => align_right(&format_general(*n, precision), width),
        Value::Str(s) => align_left(s, width),
        Value::Bar(bar) => bar.render(width),
        Value::Empty => " ".repeat(width),
        Value::Error(err) => align_left(&err.to_string(), width),
    }
}

fn fit(s: &str, width: usize) -> (&str, usize) {
    let len = s.chars().count();
    if len > width {
        (OVERFLOW, OVERFLOW.len())
    } else {
        (s, len)
    }
}

pub fn align_left(s: &str, width: usize) -> String {
    let (s, len) = fit(s, width);
    format!("{}{}", s, " ".repeat(width.saturating_sub(len)))
}

pub fn align_right(s: &str, width: usize) -> String {
    let (s, len) = fit(s, width);
    format!("{}{}", " ".repeat(width.saturating_sub(len)), s)
}

pub fn align_center(s: &str, width: usize) -> String {
    let (s, len) = fit(s, width);
    let padding = width.saturating_sub(len);
    format!(
        "{}{}{}",
        " ".repeat(padding / 2),
        s,
        " ".repeat(padding - padding / 2)
    )
}
