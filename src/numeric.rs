//! Lenient number parsing for spreadsheet cells.
//!
//! Order sheets carry values like `"12 mm"` or `"1,200"`; only the leading numeric prefix is
//! used, matching how grid widgets rank and total such columns.

use std::cmp::Ordering;

/// Parse the leading base-10 integer of `s`, ignoring leading whitespace.
///
/// Returns `None` if no digit follows the optional sign.
pub fn leading_int(s: &str) -> Option<i64> {
    let t = s.trim_start();
    let bytes = t.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    // Saturate rather than fail on absurdly long digit runs.
    t[..end].parse::<i64>().ok().or_else(|| {
        Some(if t.starts_with('-') { i64::MIN } else { i64::MAX })
    })
}

/// Parse the leading decimal number of `s` (sign, digits, one fraction, optional exponent).
pub fn leading_float(s: &str) -> Option<f64> {
    let t = s.trim_start();
    let bytes = t.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut mantissa_digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        mantissa_digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
            mantissa_digits += 1;
        }
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    t[..end].parse::<f64>().ok()
}

/// Total order used for spine values: numeric values first (ascending), then everything else
/// lexicographically. Ties between numerically equal strings fall back to the text.
pub fn cmp_numeric_then_text(a: &str, b: &str) -> Ordering {
    match (leading_float(a), leading_float(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Parse a cell that is entirely a decimal number (surrounding whitespace allowed).
///
/// Unlike [`leading_float`], trailing text such as `"12 mm"` makes the cell non-numeric.
pub fn parse_number(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() || !t.bytes().all(|b| b.is_ascii_digit() || b"+-.eE".contains(&b)) {
        return None;
    }
    t.parse::<f64>().ok()
}

/// Dictionary order for dropdown values: case-insensitive, lowercase first among otherwise
/// equal strings (`a`, `b`, `B`, `c`).
pub fn cmp_text_dictionary(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Format an integer with `,` thousands separators.
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
