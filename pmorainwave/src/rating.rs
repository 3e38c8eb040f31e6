//! Rating input handling
//!
//! Ratings are typed by the listener as short decimal strings (`"4"`,
//! `"3.5"`, `".5"`). The validator runs on every keystroke, so an empty
//! field is accepted as "no rating" and the parser tolerates one trailing
//! character that is not part of a number yet.
//!
//! Only plain decimals are accepted: no sign, no exponent, no `inf`/`nan`.

/// Lowest rating a song can receive
pub const MIN_RATING: f64 = 0.0;

/// Highest rating a song can receive
pub const MAX_RATING: f64 = 5.0;

/// Longest accepted input, e.g. `"4.5"`
pub const MAX_INPUT_LEN: usize = 3;

/// Scans the leading decimal number of `input`
///
/// Returns the value and the number of bytes consumed, or `None` when the
/// input does not start with a number.
fn scan_decimal(input: &str) -> Option<(f64, usize)> {
    let bytes = input.as_bytes();

    let int_end = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    let mut end = int_end;
    let mut frac = "";

    if bytes.get(int_end) == Some(&b'.') {
        let frac_len = bytes[int_end + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        // Un point seul n'est pas un nombre
        if int_end > 0 || frac_len > 0 {
            frac = &input[int_end + 1..int_end + 1 + frac_len];
            end = int_end + 1 + frac_len;
        }
    }

    if end == 0 {
        return None;
    }

    let int = &input[..int_end];
    let normalized = format!(
        "{}.{}",
        if int.is_empty() { "0" } else { int },
        if frac.is_empty() { "0" } else { frac }
    );
    normalized.parse::<f64>().ok().map(|value| (value, end))
}

/// Formats a rating with exactly one fractional digit
///
/// ```
/// use pmorainwave::rating::format_to_string;
///
/// assert_eq!(format_to_string(4.0), "4.0");
/// assert_eq!(format_to_string(3.5), "3.5");
/// ```
pub fn format_to_string(value: f64) -> String {
    format!("{:.1}", value)
}

/// Parses a rating typed by the listener
///
/// A single trailing character that is not part of the number is ignored,
/// so `"4x"` reads as `4.0` while the listener is still typing. Anything
/// else that does not parse gives `0.0`.
pub fn parse_to_value(input: &str) -> f64 {
    match scan_decimal(input) {
        Some((value, consumed)) if input[consumed..].chars().count() <= 1 => value,
        _ => 0.0,
    }
}

/// Checks a rating typed by the listener
///
/// - the empty string is valid and means "no rating"
/// - more than [`MAX_INPUT_LEN`] characters is invalid
/// - otherwise the whole string must parse to a value in
///   [`MIN_RATING`]..=[`MAX_RATING`]
pub fn validate(input: &str) -> bool {
    if input.is_empty() {
        return true;
    }
    if input.chars().count() > MAX_INPUT_LEN {
        return false;
    }
    match scan_decimal(input) {
        Some((value, consumed)) => {
            consumed == input.len() && (MIN_RATING..=MAX_RATING).contains(&value)
        }
        None => false,
    }
}
