//! NMEA-0183 XOR checksum.
//!
//! The checksum covers every byte strictly between `$` and `*` and is
//! transmitted as two hex digits after the `*`.

pub fn checksum(body: &[u8]) -> u8 {
    body.iter().fold(0, |c, acc| c ^ acc)
}

/// Checksum of `body` as the two uppercase hex digits sent after `*`.
pub fn fmt_checksum(body: &[u8]) -> [u8; 2] {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
    let c = checksum(body);
    [DIGITS[(c >> 4) as usize], DIGITS[(c & 0x0f) as usize]]
}

fn hex(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'A'..=b'F' => Some(0x0a + c - b'A'),
        b'a'..=b'f' => Some(0x0a + c - b'a'),
        _ => None,
    }
}

/// Splits `$<body>*HH` (optionally followed by CRLF) into the body and the
/// transmitted checksum.
pub(crate) fn split(s: &[u8]) -> Option<(&[u8], u8)> {
    let s = s.strip_suffix(b"\r\n").unwrap_or(s);
    match s {
        [b'$', body @ .., b'*', c0, c1] => Some((body, hex(*c1)? | (hex(*c0)? << 4))),
        _ => None,
    }
}

/// Returns true when `sentence` carries a `*HH` trailer matching its body.
pub fn validate(sentence: &[u8]) -> bool {
    split(sentence).is_some_and(|(body, expected)| checksum(body) == expected)
}
