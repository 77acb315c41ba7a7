use serde::Serialize;

/// 单个 header 字段，保留原始大小写
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub key: String,
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// 查询参数，key 可以重复，value 可以为空
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
}

impl QueryParam {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// 分解后的 URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts {
    /// 导出文件中的原始 URL
    pub raw: String,

    pub protocol: String,

    /// 主机名，可能为空
    pub host: String,

    /// URL 中显式写出的端口
    pub port: Option<u16>,

    /// 路径段，已去掉空段
    pub path: Vec<String>,

    pub query: Vec<QueryParam>,
}

impl UrlParts {
    /// 只有非默认端口（或非 http/https 协议的任意端口）才需要输出
    pub fn visible_port(&self) -> Option<u16> {
        let port = self.port?;
        match self.protocol.as_str() {
            "http" if port == 80 => None,
            "https" if port == 443 => None,
            _ => Some(port),
        }
    }

    /// 主机名按 `.` 拆分，空主机返回空列表
    pub fn host_labels(&self) -> Vec<String> {
        if self.host.is_empty() {
            return Vec::new();
        }
        self.host.split('.').map(str::to_string).collect()
    }

    /// 目录路径：主机名 + 除最后一段以外的路径段
    pub fn folder_path(&self) -> Vec<&str> {
        let parents = self.path.len().saturating_sub(1);
        std::iter::once(self.host.as_str())
            .chain(self.path[..parents].iter().map(String::as_str))
            .collect()
    }

    /// 请求节点名称：最后一个路径段，没有路径时为 `/`
    pub fn leaf_name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or("/")
    }
}

/// 从导出条目解析出的请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    pub method: String,
    pub url: UrlParts,
    pub headers: Vec<Header>,
    pub body: Option<String>,
}

/// 原始请求报文的编码方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlobEncoding {
    /// 没有请求报文
    #[default]
    Absent,
    /// 明文
    Plain,
    /// 标记为 base64 并成功解码
    Base64,
    /// 未标记，但内容被识别为 base64
    SniffedBase64,
    /// 标记为 base64 但解码失败，按明文处理
    InvalidBase64,
}

/// 报文拆分结果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRequest {
    pub headers: Vec<Header>,
    pub body: Option<String>,
    pub encoding: BlobEncoding,
}

/// 单个导出条目的解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedItem {
    pub request: ParsedRequest,
    pub encoding: BlobEncoding,
}
