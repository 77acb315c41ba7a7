use crate::Result;
use crate::error::Burp2PostmanError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// 配置文件内容（`burp2postman.toml`）
///
/// ```toml
/// [collection]
/// name = "My API"
///
/// [output]
/// path = "out/collection.json"
///
/// [headers]
/// skip = ["cookie"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub collection: CollectionConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub headers: HeadersConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CollectionConfig {
    /// 覆盖默认的 collection 名称
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OutputConfig {
    /// 未在命令行指定输出路径时使用
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HeadersConfig {
    /// 在 host / content-length / connection 之外额外过滤的 header
    #[serde(default)]
    pub skip: Vec<String>,
}

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    const CONFIG_FILE: &'static str = "burp2postman.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Burp2PostmanError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| Burp2PostmanError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// 查找并加载配置文件
    /// 查找顺序：
    /// 1. 当前目录及其父目录
    /// 2. 用户配置目录 ~/.config/burp2postman/
    pub fn find_and_load() -> Option<Config> {
        Self::try_load_from_current_dir().or_else(Self::try_load_from_user_dir)
    }

    fn try_load_from_current_dir() -> Option<Config> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join(Self::CONFIG_FILE);
            if config_path.exists() {
                return Self::load_discovered(&config_path);
            }

            // 尝试父目录
            if !current.pop() {
                break;
            }
        }

        None
    }

    fn try_load_from_user_dir() -> Option<Config> {
        let home = dirs::home_dir()?;
        let config_path = home
            .join(".config")
            .join("burp2postman")
            .join(Self::CONFIG_FILE);

        if config_path.exists() {
            Self::load_discovered(&config_path)
        } else {
            None
        }
    }

    /// 自动发现的配置文件解析失败时只警告，不中断转换
    fn load_discovered(path: &Path) -> Option<Config> {
        match Self::load_from_path(path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "Loaded config");
                Some(config)
            }
            Err(e) => {
                tracing::warn!("Ignoring config file: {}", e);
                None
            }
        }
    }
}
