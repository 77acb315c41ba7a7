pub mod blob;
pub mod raw_request;
pub mod types;
pub mod url_parts;

// Re-export commonly used types
pub use blob::{NormalizedBlob, normalize};
pub use raw_request::{DEFAULT_SKIPPED_HEADERS, RequestSplitter};
pub use types::{
    BlobEncoding, Header, ParsedItem, ParsedRequest, QueryParam, RawRequest, UrlParts,
};

use crate::export::BurpItem;

/// 导出条目解析器：归一化报文、拆分 header/body、分解 URL
#[derive(Debug, Clone, Default)]
pub struct RequestParser {
    splitter: RequestSplitter,
}

impl RequestParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_splitter(splitter: RequestSplitter) -> Self {
        Self { splitter }
    }

    /// 解析单个导出条目，缺少 URL 的条目返回 None
    pub fn parse_item(&self, item: &BurpItem) -> Option<ParsedItem> {
        let raw_url = item.url()?;

        let raw = item
            .request_blob()
            .map(|blob| self.parse_blob(blob.text(), blob.is_base64()))
            .unwrap_or_default();

        let request = ParsedRequest {
            method: item.method_or_default().to_string(),
            url: UrlParts::decompose(raw_url, item.protocol_hint(), item.host_hint()),
            headers: raw.headers,
            body: raw.body,
        };

        Some(ParsedItem {
            request,
            encoding: raw.encoding,
        })
    }

    /// 解析原始请求报文
    ///
    /// body 去除首尾空白；空 body 和 `{}` 都视为没有 body。
    pub fn parse_blob(&self, raw: &str, is_base64: bool) -> RawRequest {
        if raw.trim().is_empty() {
            return RawRequest::default();
        }

        let (normalized, encoding) = normalize(raw, is_base64);
        let (body, headers) = match &normalized {
            NormalizedBlob::BodyOnly(body) => (body.as_str(), Vec::new()),
            NormalizedBlob::Message(text) => self.splitter.split(text),
        };

        let body = body.trim();
        let body = (!body.is_empty() && body != "{}").then(|| body.to_string());

        RawRequest {
            headers,
            body,
            encoding,
        }
    }
}
