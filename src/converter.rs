use crate::Result;
use crate::collection::{Collection, CollectionBuilder};
use crate::config::Config;
use crate::export::{BurpExport, ExportLoader};
use crate::parser::{BlobEncoding, RequestParser, RequestSplitter};
use std::path::Path;

/// 未指定输出路径时的默认位置
pub const DEFAULT_OUTPUT: &str = "./output/burp_to_postman_nested_collection.json";

/// 默认 collection 名称：`PostmanCollection > Burp - {文件名}`
pub fn default_collection_name(source_name: &str) -> String {
    format!("PostmanCollection > Burp - {}", source_name)
}

/// 转换选项
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertOptions {
    /// 覆盖默认的 collection 名称
    pub collection_name: Option<String>,

    /// 额外过滤的 header
    pub skipped_headers: Vec<String>,
}

impl ConvertOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            collection_name: config.collection.name.clone(),
            skipped_headers: config.headers.skip.clone(),
        }
    }

    pub fn with_collection_name(mut self, name: impl Into<String>) -> Self {
        self.collection_name = Some(name.into());
        self
    }
}

/// 转换统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    /// 导出文件中的条目总数
    pub total: usize,
    /// 成功转换的请求数
    pub converted: usize,
    /// 因缺少 URL 被跳过的条目数
    pub skipped_missing_url: usize,
    /// 标记为 base64 但解码失败、按原文处理的条目数
    pub invalid_base64: usize,
}

/// 转换结果
#[derive(Debug, Clone)]
pub struct Conversion {
    pub collection: Collection,
    pub summary: ConversionSummary,
}

/// Burp 导出 -> Postman collection
pub struct Converter {
    parser: RequestParser,
    options: ConvertOptions,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConvertOptions::default())
    }
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        let splitter = RequestSplitter::new().with_skipped_headers(options.skipped_headers.clone());
        Self {
            parser: RequestParser::with_splitter(splitter),
            options,
        }
    }

    /// 加载并转换导出文件，默认名称取自文件名
    pub fn convert_file<P: AsRef<Path>>(&self, input: P) -> Result<Conversion> {
        let input = input.as_ref();
        let export = ExportLoader::load_file(input)?;
        let source_name = input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(self.convert(&export, &source_name))
    }

    /// 单次遍历所有条目，按出现顺序构建目录树
    pub fn convert(&self, export: &BurpExport, source_name: &str) -> Conversion {
        let name = self
            .options
            .collection_name
            .clone()
            .unwrap_or_else(|| default_collection_name(source_name));

        let mut builder = CollectionBuilder::new(name);
        let mut summary = ConversionSummary {
            total: export.len(),
            ..Default::default()
        };

        for (index, item) in export.items.iter().enumerate() {
            let Some(parsed) = self.parser.parse_item(item) else {
                tracing::debug!(item = index + 1, "Skipping item without URL");
                summary.skipped_missing_url += 1;
                continue;
            };

            if parsed.encoding == BlobEncoding::InvalidBase64 {
                tracing::warn!(
                    item = index + 1,
                    url = %parsed.request.url.raw,
                    "Request marked as base64 could not be decoded, kept as raw text"
                );
                summary.invalid_base64 += 1;
            }

            builder.add_request(parsed.request);
        }

        summary.converted = builder.request_count();
        tracing::info!(
            total = summary.total,
            converted = summary.converted,
            skipped = summary.skipped_missing_url,
            "Conversion finished"
        );

        Conversion {
            collection: builder.build(),
            summary,
        }
    }
}
