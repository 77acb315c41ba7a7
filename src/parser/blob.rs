use crate::parser::types::BlobEncoding;
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use regex::Regex;
use std::sync::OnceLock;

/// 未标记 base64 时用于嗅探的前缀长度（字符数）
const SNIFF_LEN: usize = 200;

/// 标准字母表，要求规范填充，容忍末尾多余比特
const BASE64_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical),
);

/// 归一化后的报文
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedBlob {
    /// 带请求行和 header 的 HTTP 报文
    Message(String),
    /// 直接捕获的 JSON/XML 请求体，没有 HTTP 头
    BodyOnly(String),
}

/// 解码（如需要）并归一化原始报文
pub fn normalize(raw: &str, is_base64: bool) -> (NormalizedBlob, BlobEncoding) {
    let (text, encoding) = decode(raw, is_base64);

    let text = text.replace("\r\n", "\n");
    let text = text.trim_start_matches('\n');

    let blob = if text.trim_start().starts_with(['{', '[', '<']) {
        NormalizedBlob::BodyOnly(text.to_string())
    } else {
        NormalizedBlob::Message(text.to_string())
    };
    (blob, encoding)
}

fn decode(raw: &str, is_base64: bool) -> (String, BlobEncoding) {
    if is_base64 {
        return match decode_base64_text(raw) {
            Some(decoded) => (decoded, BlobEncoding::Base64),
            None => {
                tracing::debug!("Request marked as base64 failed to decode, using raw text");
                (raw.to_string(), BlobEncoding::InvalidBase64)
            }
        };
    }

    let snippet: String = raw.trim().chars().take(SNIFF_LEN).collect();
    if looks_like_base64(&snippet)
        && let Some(decoded) = decode_base64_text(raw)
        && accepts_decoded(&decoded)
    {
        return (decoded, BlobEncoding::SniffedBase64);
    }

    (raw.to_string(), BlobEncoding::Plain)
}

/// 字符集符合 base64 且长度是 4 的倍数
pub fn looks_like_base64(s: &str) -> bool {
    static BASE64_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = BASE64_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9+/]+={0,2}$").unwrap());

    !s.is_empty() && s.len() % 4 == 0 && re.is_match(s)
}

/// 嗅探出的解码结果必须像 HTTP 报文或 JSON，否则视为误判
fn accepts_decoded(decoded: &str) -> bool {
    decoded.contains('\n') || decoded.trim_start().starts_with('{') || decoded.contains("HTTP/")
}

/// base64 解码为文本
///
/// 解码前丢弃字母表以外的字符（换行、空格等），非法 UTF-8 序列直接丢弃。
pub fn decode_base64_text(input: &str) -> Option<String> {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
        .collect();

    let bytes = BASE64_LENIENT.decode(cleaned.as_bytes()).ok()?;
    Some(bytes.utf8_chunks().map(|chunk| chunk.valid()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_base64() {
        assert!(looks_like_base64("R0VUIC8="));
        assert!(looks_like_base64("YWJj"));
        assert!(!looks_like_base64("YWJ"));
        assert!(!looks_like_base64(""));
        assert!(!looks_like_base64("GET / HTTP/1.1"));
        assert!(!looks_like_base64("YW==Jj=="));
        assert!(!looks_like_base64("YQ==="));
    }

    #[test]
    fn test_decode_base64_text() {
        assert_eq!(decode_base64_text("aGVsbG8="), Some("hello".to_string()));
        // 换行被忽略
        assert_eq!(decode_base64_text("aGVs\nbG8="), Some("hello".to_string()));
        assert_eq!(decode_base64_text("aGVsbG8"), None);
    }

    #[test]
    fn test_decode_drops_invalid_utf8() {
        // "a" 0xFF "b"
        assert_eq!(decode_base64_text("Yf9i"), Some("ab".to_string()));
    }

    #[test]
    fn test_flagged_base64() {
        let (blob, encoding) = normalize("R0VUIC8gSFRUUC8xLjENCkFjY2VwdDogKi8qDQoNCg==", true);
        assert_eq!(encoding, BlobEncoding::Base64);
        assert_eq!(
            blob,
            NormalizedBlob::Message("GET / HTTP/1.1\nAccept: */*\n\n".to_string())
        );
    }

    #[test]
    fn test_flagged_base64_falls_back_to_raw() {
        let (blob, encoding) = normalize("GET / HTTP/1.1\nAccept: */*", true);
        assert_eq!(encoding, BlobEncoding::InvalidBase64);
        assert_eq!(
            blob,
            NormalizedBlob::Message("GET / HTTP/1.1\nAccept: */*".to_string())
        );
    }

    #[test]
    fn test_sniffed_base64_is_accepted() {
        // "GET / HTTP/1.1\r\n\r\n"
        let (blob, encoding) = normalize("R0VUIC8gSFRUUC8xLjENCg0K", false);
        assert_eq!(encoding, BlobEncoding::SniffedBase64);
        assert_eq!(blob, NormalizedBlob::Message("GET / HTTP/1.1\n\n".to_string()));
    }

    #[test]
    fn test_sniffed_base64_without_markers_is_rejected() {
        // "abcd" 解码后为乱码，不含换行、`{` 或 `HTTP/`
        let (blob, encoding) = normalize("abcd", false);
        assert_eq!(encoding, BlobEncoding::Plain);
        assert_eq!(blob, NormalizedBlob::Message("abcd".to_string()));
    }

    #[test]
    fn test_plain_text_is_not_decoded() {
        let (blob, encoding) = normalize("GET /a HTTP/1.1\r\nAccept: */*\r\n", false);
        assert_eq!(encoding, BlobEncoding::Plain);
        assert_eq!(
            blob,
            NormalizedBlob::Message("GET /a HTTP/1.1\nAccept: */*\n".to_string())
        );
    }

    #[test]
    fn test_leading_blank_lines_are_stripped() {
        let (blob, _) = normalize("\r\n\nGET / HTTP/1.1", false);
        assert_eq!(blob, NormalizedBlob::Message("GET / HTTP/1.1".to_string()));
    }

    #[test]
    fn test_body_only_blobs() {
        let (blob, _) = normalize("\n  {\"a\": 1}", false);
        assert_eq!(blob, NormalizedBlob::BodyOnly("  {\"a\": 1}".to_string()));

        let (blob, _) = normalize("[1, 2]", false);
        assert_eq!(blob, NormalizedBlob::BodyOnly("[1, 2]".to_string()));

        let (blob, _) = normalize("<a>b</a>", false);
        assert_eq!(blob, NormalizedBlob::BodyOnly("<a>b</a>".to_string()));
    }

    #[test]
    fn test_base64_json_body() {
        // `{"a":1}` 编码后被嗅探解码，并按纯请求体处理
        let (blob, encoding) = normalize("eyJhIjoxfQ==", false);
        assert_eq!(encoding, BlobEncoding::SniffedBase64);
        assert_eq!(blob, NormalizedBlob::BodyOnly("{\"a\":1}".to_string()));
    }
}
