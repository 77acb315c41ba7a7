use crate::error::Burp2PostmanError;
use crate::export::types::BurpExport;
use crate::Result;
use std::path::Path;

/// Burp XML 导出文件加载器
pub struct ExportLoader;

impl ExportLoader {
    /// 从文件路径加载
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<BurpExport> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Burp2PostmanError::InputNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let export = Self::parse_content(&content)?;
        tracing::debug!(path = %path.display(), items = export.len(), "Loaded Burp export");
        Ok(export)
    }

    /// 从字符串内容解析
    ///
    /// 结构错误会让整个加载失败，单个条目缺字段不会。
    pub fn parse_content(content: &str) -> Result<BurpExport> {
        let export: BurpExport = quick_xml::de::from_str(content)?;
        Ok(export)
    }
}
