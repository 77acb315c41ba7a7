use crate::parser::types::{QueryParam, UrlParts};
use url::{Url, form_urlencoded};

/// 既没有 scheme 也没有备用协议时使用
pub const DEFAULT_PROTOCOL: &str = "https";

impl UrlParts {
    /// 分解导出条目中的 URL
    ///
    /// 直接按原始文本拆分，不做 WHATWG 规范化：路径段、`..`、非 ASCII 字符
    /// 和主机名都保持原样，这样目录树与导出中的 URL 一一对应。
    /// `protocol_hint` / `host_hint` 来自条目自身的 `protocol`、`host` 字段，
    /// 仅在 URL 没有给出对应部分时使用。
    pub fn decompose(raw: &str, protocol_hint: Option<&str>, host_hint: Option<&str>) -> Self {
        if let Err(e) = Url::parse(raw) {
            tracing::debug!(url = raw, error = %e, "URL is not absolute, using record hints");
        }

        let without_fragment = raw.split('#').next().unwrap_or_default();
        let (before_query, query) = without_fragment
            .split_once('?')
            .unwrap_or((without_fragment, ""));

        let (scheme, rest) = split_scheme(before_query);
        let (authority, path) = match rest.strip_prefix("//") {
            Some(rest) => {
                let end = rest.find('/').unwrap_or(rest.len());
                (Some(&rest[..end]), &rest[end..])
            }
            None => (None, rest),
        };

        let host = authority
            .map(host_of_authority)
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| host_hint.unwrap_or_default().to_string());

        Self {
            raw: raw.to_string(),
            protocol: scheme
                .or_else(|| protocol_hint.map(str::to_string))
                .unwrap_or_else(|| DEFAULT_PROTOCOL.to_string()),
            host,
            port: authority.and_then(port_of_authority),
            path: path_segments(path),
            query: form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| QueryParam::new(k, v))
                .collect(),
        }
    }
}

/// 按 `/` 拆分，去掉空段（连续、开头、结尾的斜杠）
fn path_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// `scheme:` 前缀，scheme 必须以字母开头
fn split_scheme(input: &str) -> (Option<String>, &str) {
    if let Some((scheme, rest)) = input.split_once(':')
        && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        return (Some(scheme.to_ascii_lowercase()), rest);
    }
    (None, input)
}

fn host_of_authority(authority: &str) -> String {
    let host_port = authority.rsplit('@').next().unwrap_or(authority);
    let host = match host_port.strip_prefix('[') {
        Some(rest) => rest.split(']').next().unwrap_or_default(),
        None => host_port.split(':').next().unwrap_or_default(),
    };
    host.to_lowercase()
}

/// 显式写出的端口；端口 0 视为未指定
fn port_of_authority(authority: &str) -> Option<u16> {
    let host_port = authority.rsplit('@').next().unwrap_or(authority);
    let after_host = match host_port.strip_prefix('[') {
        Some(rest) => rest.split_once(']').map(|(_, port)| port).unwrap_or_default(),
        None => host_port,
    };
    let (_, port) = after_host.rsplit_once(':')?;
    port.parse::<u16>().ok().filter(|port| *port != 0)
}
