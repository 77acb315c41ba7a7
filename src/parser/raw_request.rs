use crate::parser::types::Header;
use regex::Regex;
use std::sync::OnceLock;

/// 由目标格式自行计算的连接管理类 header
pub const DEFAULT_SKIPPED_HEADERS: [&str; 3] = ["host", "content-length", "connection"];

/// 把 HTTP 报文拆分为 header 和 body
#[derive(Debug, Clone)]
pub struct RequestSplitter {
    skipped_headers: Vec<String>,
}

impl Default for RequestSplitter {
    fn default() -> Self {
        Self {
            skipped_headers: DEFAULT_SKIPPED_HEADERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl RequestSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 在默认列表之外追加需要过滤的 header（大小写不敏感）
    pub fn with_skipped_headers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !self.is_skipped(&name) {
                self.skipped_headers.push(name);
            }
        }
        self
    }

    pub fn is_skipped(&self, key: &str) -> bool {
        self.skipped_headers
            .iter()
            .any(|skipped| skipped.eq_ignore_ascii_case(key))
    }

    /// 按第一个空行拆分，返回 (body, headers)
    ///
    /// 没有空行时整段都是 header，body 为空。
    pub fn split<'a>(&self, text: &'a str) -> (&'a str, Vec<Header>) {
        static BLANK_LINE: OnceLock<Regex> = OnceLock::new();
        let re = BLANK_LINE.get_or_init(|| Regex::new(r"\n\s*\n").unwrap());

        let mut parts = re.splitn(text, 2);
        let header_block = parts.next().unwrap_or_default();
        let body = parts.next().unwrap_or_default();

        (body, self.parse_headers(header_block))
    }

    /// 解析 header 块，跳过请求行
    fn parse_headers(&self, block: &str) -> Vec<Header> {
        let mut lines = split_lines(block).into_iter().peekable();

        if lines.peek().is_some_and(|first| is_request_line(first)) {
            lines.next();
        }

        lines
            .filter_map(parse_header_line)
            .filter(|header| {
                let skipped = self.is_skipped(&header.key);
                if skipped {
                    tracing::trace!(header = %header.key, "Dropping transport header");
                }
                !skipped
            })
            .collect()
    }
}

/// 按行拆分，除 `\n`、`\r\n` 外，单独的 `\r` 及其他 Unicode 行分隔符也算换行
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' && chars.next_if(|&(_, next)| next == '\n').is_some() {
            start += 1;
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// 判断是否为请求行/状态行，如 `POST /api HTTP/1.1`
fn is_request_line(line: &str) -> bool {
    static REQUEST_LINE: OnceLock<Regex> = OnceLock::new();
    let re = REQUEST_LINE.get_or_init(|| Regex::new(r"^[A-Z]+\s+/|\s+HTTP/").unwrap());
    re.is_match(line)
}

/// 按第一个冒号拆分，没有冒号的行被丢弃
fn parse_header_line(line: &str) -> Option<Header> {
    let (key, value) = line.split_once(':')?;
    Some(Header::new(key.trim(), value.trim()))
}
