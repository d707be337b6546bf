//! # Base64 Encoding
//!
//! Inline image and document payloads for the generative AI backend travel as
//! standard (padded) base64.

use base64::{engine::general_purpose, Engine as _};

/// Encode bytes to a standard base64 string.
pub fn b64_encode(content: impl AsRef<[u8]>) -> String {
    general_purpose::STANDARD.encode(content)
}

/// Drop a `data:<mime>;base64,` prefix if present, returning only the payload.
pub fn strip_data_url(value: &str) -> &str {
    match value.split_once(";base64,") {
        Some((prefix, payload)) if prefix.starts_with("data:") => payload,
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_padded() {
        assert_eq!(b64_encode(b"leaf"), "bGVhZg==");
    }

    #[test]
    fn test_strip_data_url() {
        assert_eq!(strip_data_url("data:image/jpeg;base64,QUJD"), "QUJD");
        assert_eq!(strip_data_url("QUJD"), "QUJD");
    }
}
