//! Integer helpers for line numbers and numeric prompts.

/// Number of decimal digits in `n`.
pub const fn digit_count(mut n: usize) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Parse a decimal integer typed at a prompt.
///
/// Leading spaces/tabs and an optional sign are accepted, trailing
/// spaces/tabs are ignored. Anything else after the digits makes the whole
/// input invalid and yields `None`. Values beyond `i64` saturate.
pub fn parse_int(input: &str) -> Option<i64> {
    let s = input.trim_start_matches([' ', '\t']);
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_end = s.bytes().position(|b| !b.is_ascii_digit()).unwrap_or(s.len());
    let (digits, rest) = s.split_at(digits_end);
    if !rest.bytes().all(|b| b == b' ' || b == b'\t') {
        return None;
    }

    let mut value: i64 = 0;
    for b in digits.bytes() {
        let d = i64::from(b - b'0');
        value = match value.checked_mul(10).and_then(|v| v.checked_add(d)) {
            Some(v) => v,
            None => return Some(if negative { i64::MIN } else { i64::MAX }),
        };
    }
    Some(if negative { -value } else { value })
}
