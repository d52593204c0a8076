use super::ExtractionError;

/// Strict UTF-8 decode. Invalid sequences are an error, never replaced.
pub fn decode_text(data: Vec<u8>) -> Result<String, ExtractionError> {
    Ok(String::from_utf8(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_keeps_content_verbatim() {
        let text = decode_text("  Jane Doe\r\nRust · Go\n".as_bytes().to_vec()).unwrap();
        assert_eq!(text, "  Jane Doe\r\nRust · Go\n");
    }

    #[test]
    fn test_decode_empty_file() {
        assert_eq!(decode_text(Vec::new()).unwrap(), "");
    }

    #[test]
    fn test_decode_rejects_latin1() {
        // "café" encoded as ISO-8859-1
        let err = decode_text(vec![0x63, 0x61, 0x66, 0xe9]).unwrap_err();
        assert!(err.to_string().starts_with("Invalid UTF-8 text"));
    }
}
