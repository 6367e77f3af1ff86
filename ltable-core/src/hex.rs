/// Hex codec for transporting arbitrary text through restricted channels
///
/// Encodes a string as the uppercase hex rendering of its UTF-16LE code
/// units. Decoding is lenient: anything that is not a valid encoding is
/// handed back unchanged, so callers can feed mixed hex and plain strings
/// through the same path.

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Convert a string to the hex rendering of its UTF-16LE code units.
pub fn to_hex_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 4);
    for unit in s.encode_utf16() {
        for byte in unit.to_le_bytes() {
            out.push(HEX[(byte >> 4) as usize] as char);
            out.push(HEX[(byte & 0x0F) as usize] as char);
        }
    }
    out
}

/// Inverse of [`to_hex_string`].
///
/// Input that is not a valid encoding (a non-hex digit, or a length that
/// is not a whole number of code units) is returned unchanged rather than
/// rejected. Unpaired surrogates in otherwise valid input decode to the
/// replacement character.
pub fn from_hex_string(hex: &str) -> String {
    if hex.is_empty() {
        return String::new();
    }
    if hex.len() % 4 != 0 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return hex.to_string();
    }

    let bytes: Vec<u8> = hex
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            let hi = (pair[0] as char).to_digit(16).unwrap() as u8;
            let lo = (pair[1] as char).to_digit(16).unwrap() as u8;
            (hi << 4) | lo
        })
        .collect();

    let units: Vec<u16> = bytes
        .chunks(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    String::from_utf16_lossy(&units)
}
