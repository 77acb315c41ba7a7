use crate::collection::types::Collection;
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// 序列化为 2 空格缩进的 JSON，非 ASCII 字符原样输出
pub fn to_json_string(collection: &Collection) -> Result<String> {
    Ok(serde_json::to_string_pretty(collection)?)
}

/// 写出 collection 文件，必要时创建目录，返回输出文件的绝对路径
///
/// 返回的路径不解析符号链接。
pub fn write_collection<P: AsRef<Path>>(collection: &Collection, path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let json = to_json_string(collection)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, json)?;

    let absolute = std::path::absolute(path)?;
    tracing::debug!(path = %absolute.display(), "Collection written");
    Ok(absolute)
}
