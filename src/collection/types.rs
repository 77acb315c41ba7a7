use crate::parser::{Header, QueryParam};
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Postman Collection v2.1 schema
pub const SCHEMA_V2_1: &str = "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// 完整的 Postman collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection {
    pub info: Info,
    pub item: ItemList,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Info {
    pub name: String,
    pub schema: String,
}

impl Info {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: SCHEMA_V2_1.to_string(),
        }
    }
}

/// 树节点：目录或请求，二者互斥
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FolderNode {
    Folder(Folder),
    Request(RequestItem),
}

impl FolderNode {
    pub fn name(&self) -> &str {
        match self {
            FolderNode::Folder(folder) => &folder.name,
            FolderNode::Request(request) => &request.name,
        }
    }

    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            FolderNode::Folder(folder) => Some(folder),
            FolderNode::Request(_) => None,
        }
    }

    pub fn as_request(&self) -> Option<&RequestItem> {
        match self {
            FolderNode::Folder(_) => None,
            FolderNode::Request(request) => Some(request),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Folder {
    pub name: String,
    pub item: ItemList,
}

impl Folder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item: ItemList::new(),
        }
    }
}

/// 有序的子节点列表
///
/// `folders` 只索引目录节点的位置，同名的请求节点永远不会被当作目录复用。
/// 序列化时只输出节点数组，保持插入顺序。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemList {
    nodes: Vec<FolderNode>,
    folders: HashMap<String, usize>,
}

impl ItemList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FolderNode> {
        self.nodes.iter()
    }

    pub fn get(&self, index: usize) -> Option<&FolderNode> {
        self.nodes.get(index)
    }

    /// 按名称查找子目录
    pub fn folder(&self, name: &str) -> Option<&Folder> {
        let index = *self.folders.get(name)?;
        self.nodes[index].as_folder()
    }

    /// 查找或创建子目录
    pub fn folder_mut(&mut self, name: &str) -> &mut Folder {
        let index = match self.folders.get(name) {
            Some(&index) => index,
            None => {
                self.nodes.push(FolderNode::Folder(Folder::new(name)));
                let index = self.nodes.len() - 1;
                self.folders.insert(name.to_string(), index);
                index
            }
        };

        match &mut self.nodes[index] {
            FolderNode::Folder(folder) => folder,
            FolderNode::Request(_) => unreachable!("folder index points at a request"),
        }
    }

    /// 追加请求节点
    pub fn push_request(&mut self, request: RequestItem) {
        self.nodes.push(FolderNode::Request(request));
    }
}

impl Serialize for ItemList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.nodes.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a ItemList {
    type Item = &'a FolderNode;
    type IntoIter = std::slice::Iter<'a, FolderNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// 请求叶子节点
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestItem {
    pub name: String,
    pub request: PostmanRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostmanRequest {
    pub method: String,
    pub header: Vec<Header>,
    pub url: PostmanUrl,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<RawBody>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostmanUrl {
    pub raw: String,
    pub protocol: String,
    pub host: Vec<String>,
    pub path: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<QueryParam>,
}

/// `{"mode": "raw", "raw": "..."}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawBody {
    pub mode: &'static str,
    pub raw: String,
}

impl RawBody {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            mode: "raw",
            raw: raw.into(),
        }
    }
}
