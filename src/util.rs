// permissive integer parsing

/// Parses an optional sign followed by the leading decimal digits of `s`.
/// Anything after the digits is ignored; no digits gives 0. Out of range
/// values saturate.
pub(crate) fn parse_i64_lenient(s: &str) -> i64 {
    let bytes = s.as_bytes();
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };
    let mut acc: i64 = 0;
    for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        let d = (b - b'0') as i64;
        acc = match acc.checked_mul(10).and_then(|v| {
            if negative { v.checked_sub(d) } else { v.checked_add(d) }
        }) {
            Some(v) => v,
            None => return if negative { i64::MIN } else { i64::MAX },
        };
    }
    acc
}
