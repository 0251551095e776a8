// hvac-core/src/reading.rs

/// Best-effort guess at the number a label refers to, for display next to
/// the raw excerpt.
///
/// Skips the label, then takes the first run of digits (with an optional
/// leading `-` and one fractional part). `temp</td><td>22.4` gives `22.4`.
/// Returns `None` when the excerpt holds no digits.
pub fn leading_number(excerpt: &str, label: &str) -> Option<f64> {
    let rest = excerpt.strip_prefix(label).unwrap_or(excerpt);
    let bytes = rest.as_bytes();

    let first_digit = bytes.iter().position(u8::is_ascii_digit)?;
    let start = if first_digit > 0 && bytes[first_digit - 1] == b'-' {
        first_digit - 1
    } else {
        first_digit
    };

    let mut end = skip_digits(bytes, first_digit);
    if bytes.get(end) == Some(&b'.') && bytes.get(end + 1).is_some_and(u8::is_ascii_digit) {
        end = skip_digits(bytes, end + 1);
    }

    rest[start..end].parse().ok()
}

fn skip_digits(bytes: &[u8], mut at: usize) -> usize {
    while at < bytes.len() && bytes[at].is_ascii_digit() {
        at += 1;
    }
    at
}
