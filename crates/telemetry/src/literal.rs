//! Locale-independent literal extraction.
//!
//! All functions read a *prefix* of the input and ignore whatever follows,
//! the way a status message is scanned right after a key pattern.

/// Parse the longest float prefix of `bytes`.
///
/// Leading ASCII whitespace is skipped. The accepted shape is
/// `[+-]digits[.digits][(e|E)[+-]digits]`. When no digit is found the
/// result is `0.0`, which is the documented value of an unparseable field.
///
/// ```
/// # use telemetry::parse_float_prefix;
/// assert_eq!(parse_float_prefix(b" 73.5,\"next\":1"), 73.5);
/// assert_eq!(parse_float_prefix(b"-2e3}"), -2000.0);
/// assert_eq!(parse_float_prefix(b"null"), 0.0);
/// ```
pub fn parse_float_prefix(bytes: &[u8]) -> f32 {
    let bytes = skip_whitespace(bytes);
    let mut end = sign_len(bytes);
    let int_digits = digit_run(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digit_run(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0.0;
    }

    // exponent only counts when it carries at least one digit
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp_sign = sign_len(&bytes[end + 1..]);
        let exp_digits = digit_run(&bytes[end + 1 + exp_sign..]);
        if exp_digits > 0 {
            end += 1 + exp_sign + exp_digits;
        }
    }

    std::str::from_utf8(&bytes[..end])
        .ok()
        .and_then(|text| text.parse().ok())
        .unwrap_or(0.0)
}

/// Parse the longest `[+-]digits` prefix of `bytes`, saturating at the
/// bounds of `i64`. No digits yields `0`.
///
/// ```
/// # use telemetry::parse_int_prefix;
/// assert_eq!(parse_int_prefix(b"1200.0]"), 1200);
/// assert_eq!(parse_int_prefix(b" -1,"), -1);
/// assert_eq!(parse_int_prefix(b"]"), 0);
/// ```
pub fn parse_int_prefix(bytes: &[u8]) -> i64 {
    let bytes = skip_whitespace(bytes);
    let sign = sign_len(bytes);
    let negative = sign == 1 && bytes[0] == b'-';
    let digits = &bytes[sign..sign + digit_run(&bytes[sign..])];

    let magnitude = digits.iter().fold(0i64, |acc, digit| {
        acc.saturating_mul(10)
            .saturating_add(i64::from(digit - b'0'))
    });
    if negative { -magnitude } else { magnitude }
}

/// Content of a quoted string whose opening quote was already consumed:
/// everything up to the closing `"` (or the end of input).
///
/// The result is lossily decoded and cut to at most `capacity - 1` bytes on
/// a character boundary, so an oversized value is truncated rather than
/// rejected.
///
/// ```
/// # use telemetry::quoted_prefix;
/// assert_eq!(quoted_prefix(b"macbook\",\"os\"", 64), "macbook");
/// assert_eq!(quoted_prefix(b"abcdef\"", 4), "abc");
/// ```
pub fn quoted_prefix(bytes: &[u8], capacity: usize) -> String {
    let end = bytes.iter().position(|&b| b == b'"').unwrap_or(bytes.len());
    let mut text = String::from_utf8_lossy(&bytes[..end]).into_owned();
    let limit = capacity.saturating_sub(1);
    if text.len() > limit {
        let mut cut = limit;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
    }
    text
}

fn skip_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    &bytes[start..]
}

fn sign_len(bytes: &[u8]) -> usize {
    usize::from(matches!(bytes.first(), Some(b'+' | b'-')))
}

fn digit_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
