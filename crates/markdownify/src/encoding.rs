//! Byte input decoding.

use encoding_rs::{Encoding, UTF_8};

use crate::error::{ConversionError, Result};

/// Resolve an encoding label such as `"latin1"` or `"Shift_JIS"`.
///
/// # Errors
///
/// Returns [`ConversionError::Encoding`] for labels `encoding_rs` does not know.
pub fn resolve(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| ConversionError::Encoding(format!("Unknown encoding: {label}")))
}

/// Decode raw markup bytes to a string.
///
/// A byte order mark wins over `label`; without either the input is read as
/// UTF-8. Malformed sequences become U+FFFD.
///
/// # Errors
///
/// Returns [`ConversionError::Encoding`] when `label` is not a known encoding.
pub fn decode(bytes: &[u8], label: Option<&str>) -> Result<String> {
    let fallback = label.map(resolve).transpose()?.unwrap_or(UTF_8);
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => (fallback, bytes),
    };
    let (text, had_errors) = encoding.decode_without_bom_handling(body);
    if had_errors {
        log::debug!("replaced malformed {} sequences in input", encoding.name());
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_default() {
        assert_eq!(decode("<p>é</p>".as_bytes(), None).unwrap(), "<p>é</p>");
    }

    #[test]
    fn test_bom_wins_over_label() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("<p>é</p>".as_bytes());
        assert_eq!(decode(&bytes, Some("latin1")).unwrap(), "<p>é</p>");
    }

    #[test]
    fn test_label_decoding() {
        assert_eq!(decode(&[0x3C, 0x62, 0x3E, 0xE9], Some("latin1")).unwrap(), "<b>é");
    }

    #[test]
    fn test_malformed_bytes_replaced() {
        assert_eq!(decode(&[b'a', 0xFF, b'b'], None).unwrap(), "a\u{FFFD}b");
    }

    #[test]
    fn test_unknown_label() {
        let err = decode(b"x", Some("klingon")).unwrap_err();
        assert!(matches!(err, ConversionError::Encoding(_)));
        assert!(err.to_string().contains("Unknown encoding: klingon"));
    }
}
