use crate::collection::types::{
    Collection, Info, ItemList, PostmanRequest, PostmanUrl, RawBody, RequestItem,
};
use crate::parser::{ParsedRequest, UrlParts};

/// 沿路径段逐级查找或创建目录，返回最深一级目录的子节点列表
///
/// 只会匹配目录节点；与路径段同名的请求节点不会被复用，而是新建一个同级目录。
pub fn resolve<'a, S: AsRef<str>>(mut list: &'a mut ItemList, path: &[S]) -> &'a mut ItemList {
    for segment in path {
        list = &mut list.folder_mut(segment.as_ref()).item;
    }
    list
}

/// 按主机名和路径构建嵌套目录树
#[derive(Debug, Clone)]
pub struct CollectionBuilder {
    name: String,
    items: ItemList,
    requests: usize,
}

impl CollectionBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: ItemList::new(),
            requests: 0,
        }
    }

    /// 把请求挂到 `[host, path[..n-1]]` 目录下
    pub fn add_request(&mut self, request: ParsedRequest) {
        let folder_path: Vec<String> = request
            .url
            .folder_path()
            .into_iter()
            .map(str::to_string)
            .collect();

        tracing::debug!(
            folder = %folder_path.join("/"),
            name = request.url.leaf_name(),
            method = %request.method,
            "Adding request"
        );

        resolve(&mut self.items, &folder_path).push_request(RequestItem::from(request));
        self.requests += 1;
    }

    /// 已添加的请求数量
    pub fn request_count(&self) -> usize {
        self.requests
    }

    pub fn build(self) -> Collection {
        Collection {
            info: Info::new(self.name),
            item: self.items,
        }
    }
}

impl From<ParsedRequest> for RequestItem {
    fn from(parsed: ParsedRequest) -> Self {
        Self {
            name: parsed.url.leaf_name().to_string(),
            request: PostmanRequest {
                method: parsed.method,
                header: parsed.headers,
                url: PostmanUrl::from(parsed.url),
                body: parsed.body.map(RawBody::new),
            },
        }
    }
}

impl From<UrlParts> for PostmanUrl {
    fn from(url: UrlParts) -> Self {
        Self {
            port: url.visible_port().map(|port| port.to_string()),
            host: url.host_labels(),
            raw: url.raw,
            protocol: url.protocol,
            path: url.path,
            query: url.query,
        }
    }
}
