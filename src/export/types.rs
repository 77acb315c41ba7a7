use serde::Deserialize;

/// Burp Suite 代理历史导出文件
///
/// 根元素名称（通常为 `<items>`）不做校验，只收集其下重复出现的 `<item>`。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BurpExport {
    /// 按文档顺序排列的条目
    #[serde(rename = "item", default)]
    pub items: Vec<BurpItem>,
}

impl BurpExport {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// 导出文件中的单个请求记录
///
/// 未列出的子元素（`time`、`port`、`status`、`response` 等）在反序列化时被忽略。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BurpItem {
    #[serde(default)]
    pub method: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    /// URL 中没有 scheme 时的备用协议
    #[serde(default)]
    pub protocol: Option<String>,

    /// URL 中没有主机名时的备用主机，Burp 会附带 `ip` 属性
    #[serde(default)]
    pub host: Option<TextField>,

    /// 原始请求报文（可能是 base64）
    #[serde(default)]
    pub request: Option<RequestBlob>,
}

impl BurpItem {
    /// 获取 HTTP 方法，缺失或为空时返回 "GET"
    ///
    /// 只含空白的方法去掉空白后原样返回空字符串，不会回退到 "GET"。
    pub fn method_or_default(&self) -> &str {
        match self.method.as_deref() {
            None | Some("") => "GET",
            Some(method) => method.trim(),
        }
    }

    /// 去除首尾空白后的 URL，空 URL 视为缺失
    pub fn url(&self) -> Option<&str> {
        non_blank(self.url.as_deref())
    }

    pub fn protocol_hint(&self) -> Option<&str> {
        non_blank(self.protocol.as_deref())
    }

    pub fn host_hint(&self) -> Option<&str> {
        non_blank(self.host.as_ref().map(|h| h.value.as_str()))
    }

    /// 仅在报文非空白时返回请求块
    pub fn request_blob(&self) -> Option<&RequestBlob> {
        self.request.as_ref().filter(|r| !r.text().trim().is_empty())
    }
}

/// 只关心文本内容的元素，属性被忽略
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TextField {
    #[serde(rename = "$text", default)]
    pub value: String,
}

/// `<request base64="true"><![CDATA[...]]></request>`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RequestBlob {
    #[serde(rename = "@base64", default)]
    pub base64: Option<String>,

    #[serde(rename = "$text", default)]
    pub text: Option<String>,
}

impl RequestBlob {
    pub fn is_base64(&self) -> bool {
        self.base64
            .as_deref()
            .is_some_and(|flag| flag.trim().eq_ignore_ascii_case("true"))
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
