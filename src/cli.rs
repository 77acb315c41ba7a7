use std::path::PathBuf;

use anyhow::Context;
use burp2postman::Burp2PostmanError;
use burp2postman::collection::write_collection;
use burp2postman::config::{Config, ConfigLoader};
use burp2postman::converter::{ConvertOptions, Converter, DEFAULT_OUTPUT};
use clap::Parser;

pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Burp Suite 导出的 XML 文件
    pub input: PathBuf,

    /// 输出的 Postman collection 文件
    /// [default: ./output/burp_to_postman_nested_collection.json]
    pub output: Option<PathBuf>,

    /// Collection 名称，默认 "PostmanCollection > Burp - <输入文件名>"
    #[arg(short, long)]
    pub name: Option<String>,

    /// 配置文件路径，未指定时自动查找 burp2postman.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// 命令行参数优先于配置文件
    fn output_path(&self, config: &Config) -> PathBuf {
        self.output
            .clone()
            .or_else(|| config.output.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    fn convert_options(&self, config: &Config) -> ConvertOptions {
        let options = ConvertOptions::from_config(config);
        match &self.name {
            Some(name) => options.with_collection_name(name),
            None => options,
        }
    }
}

/// 执行转换，返回输出文件的绝对路径
pub fn run(cli: Cli) -> Result<PathBuf> {
    if !cli.input.is_file() {
        return Err(Burp2PostmanError::InputNotFound(cli.input.clone()).into());
    }

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_path(path)?,
        None => ConfigLoader::find_and_load().unwrap_or_default(),
    };

    let converter = Converter::new(cli.convert_options(&config));
    let conversion = converter.convert_file(&cli.input)?;

    if conversion.summary.skipped_missing_url > 0 {
        tracing::info!(
            "Skipped {} item(s) without a URL",
            conversion.summary.skipped_missing_url
        );
    }

    let output = cli.output_path(&config);
    let written = write_collection(&conversion.collection, &output)
        .with_context(|| format!("Error saving output file '{}'", output.display()))?;

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use tempfile::TempDir;

    const EXPORT: &str = r#"<?xml version="1.0"?>
<items>
  <item>
    <url><![CDATA[https://api.example.com/v1/users]]></url>
    <method><![CDATA[GET]]></method>
    <request base64="false"><![CDATA[GET /v1/users HTTP/1.1
Host: api.example.com
Accept: application/json

]]></request>
  </item>
</items>
"#;

    fn write_export(dir: &TempDir) -> PathBuf {
        let input = dir.path().join("burp.xml");
        fs::write(&input, EXPORT).unwrap();
        input
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_positional_args() {
        let cli = Cli::try_parse_from(["burp2postman", "in.xml", "out.json"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("in.xml"));
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
        assert_eq!(cli.name, None);

        let cli = Cli::try_parse_from(["burp2postman", "in.xml", "--name", "Demo"]).unwrap();
        assert_eq!(cli.output, None);
        assert_eq!(cli.name.as_deref(), Some("Demo"));
    }

    #[test]
    fn test_missing_input_is_usage_error() {
        assert!(Cli::try_parse_from(["burp2postman"]).is_err());
    }

    #[test]
    fn test_output_path_precedence() {
        let mut config = Config::default();
        let cli = Cli::try_parse_from(["burp2postman", "in.xml"]).unwrap();
        assert_eq!(cli.output_path(&config), PathBuf::from(DEFAULT_OUTPUT));

        config.output.path = Some(PathBuf::from("cfg.json"));
        assert_eq!(cli.output_path(&config), PathBuf::from("cfg.json"));

        let cli = Cli::try_parse_from(["burp2postman", "in.xml", "cli.json"]).unwrap();
        assert_eq!(cli.output_path(&config), PathBuf::from("cli.json"));
    }

    #[test]
    fn test_name_overrides_config() {
        let mut config = Config::default();
        config.collection.name = Some("From config".to_string());

        let cli = Cli::try_parse_from(["burp2postman", "in.xml"]).unwrap();
        assert_eq!(
            cli.convert_options(&config).collection_name.as_deref(),
            Some("From config")
        );

        let cli = Cli::try_parse_from(["burp2postman", "in.xml", "-n", "From CLI"]).unwrap();
        assert_eq!(
            cli.convert_options(&config).collection_name.as_deref(),
            Some("From CLI")
        );
    }

    #[test]
    fn test_run_missing_input() {
        let cli = Cli::try_parse_from(["burp2postman", "/no/such/export.xml"]).unwrap();
        let err = run(cli).unwrap_err();
        assert_eq!(err.to_string(), "Input file '/no/such/export.xml' not found.");
    }

    #[test]
    fn test_run_writes_collection() {
        let dir = TempDir::new().unwrap();
        let input = write_export(&dir);
        let output = dir.path().join("out").join("collection.json");
        let config_path = dir.path().join("burp2postman.toml");
        fs::write(&config_path, "").unwrap();

        let cli = Cli {
            input,
            output: Some(output.clone()),
            name: None,
            config: Some(config_path),
        };
        let written = run(cli).unwrap();
        assert!(written.is_absolute());

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json["info"]["name"], "PostmanCollection > Burp - burp.xml");
        assert_eq!(json["item"][0]["name"], "api.example.com");
        assert_eq!(json["item"][0]["item"][0]["name"], "v1");
        assert_eq!(json["item"][0]["item"][0]["item"][0]["name"], "users");
    }

    #[test]
    fn test_run_invalid_config() {
        let dir = TempDir::new().unwrap();
        let input = write_export(&dir);
        let config_path = dir.path().join("bad.toml");
        fs::write(&config_path, "[output\n").unwrap();

        let cli = Cli {
            input,
            output: Some(dir.path().join("out.json")),
            name: None,
            config: Some(config_path),
        };
        assert!(run(cli).is_err());
    }
}
