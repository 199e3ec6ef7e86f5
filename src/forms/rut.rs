//! Chilean RUT helpers
//!
//! A RUT is a 7 or 8 digit body plus a mod-11 check digit (`0`-`9` or `K`),
//! displayed as `12.345.678-5`.

const MAX_FORMATTED_LEN: usize = 12;

/// Keep only digits, `K`, dots and dashes, uppercased
fn clean_input(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, 'k' | 'K' | '.' | '-'))
        .collect::<String>()
        .to_uppercase()
}

/// Check digit for a body of ASCII digits
pub fn compute_rut_dv(body: &str) -> char {
    let sum: u32 = body
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .zip((2..=7).cycle())
        .map(|(digit, multiplier)| digit * multiplier)
        .sum();

    match 11 - (sum % 11) {
        11 => '0',
        10 => 'K',
        rest => char::from_digit(rest, 10).unwrap_or('0'),
    }
}

/// Validate a RUT as typed.
///
/// `None` while the input does not yet look like `<7-8 digits>-<dv>`, so the
/// form can hold off on showing an error; otherwise whether the check digit
/// matches.
pub fn is_valid_rut(input: &str) -> Option<bool> {
    let clean: String = clean_input(input).chars().filter(|c| *c != '.').collect();
    let (body, dv) = clean.split_once('-')?;

    let body_ok = (7..=8).contains(&body.len()) && body.chars().all(|c| c.is_ascii_digit());
    let mut dv_chars = dv.chars();
    let dv = match (dv_chars.next(), dv_chars.next()) {
        (Some(c), None) if c.is_ascii_digit() || c == 'K' => c,
        _ => return None,
    };
    if !body_ok {
        return None;
    }

    Some(compute_rut_dv(body) == dv)
}

/// Format as `12.345.678-K`: dots every three body characters, a dash
/// before the check digit, at most 12 characters
pub fn format_rut(input: &str) -> String {
    let compact: Vec<char> = clean_input(input)
        .chars()
        .filter(|c| !matches!(c, '.' | '-'))
        .collect();

    let Some((dv, body)) = compact.split_last() else {
        return String::new();
    };

    if body.is_empty() {
        return dv.to_string();
    }

    let mut formatted = String::with_capacity(MAX_FORMATTED_LEN + 4);
    for (i, c) in body.iter().enumerate() {
        if i > 0 && (body.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(*c);
    }
    formatted.push('-');
    formatted.push(*dv);

    formatted.chars().take(MAX_FORMATTED_LEN).collect()
}
