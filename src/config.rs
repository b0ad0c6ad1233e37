use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// 指定 TOML 配置文件路径的环境变量
pub const CONFIG_FILE_ENV: &str = "ORDERS_CONFIG";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// XML 文件存放目录
    pub xml_folder: String,
    /// JSON 输出目录（不存在时自动创建）
    pub json_output_folder: String,
    /// SQLite 数据库路径
    pub db_path: String,
    /// 每个文件的最大尝试次数
    pub max_retries: usize,
    /// 两次尝试之间的等待时间（毫秒）
    pub retry_delay_ms: u64,
    /// 输出日志文件
    pub log_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            xml_folder: "xml-files".to_string(),
            json_output_folder: "json-output".to_string(),
            db_path: "orders.db".to_string(),
            max_retries: 3,
            retry_delay_ms: 0,
            log_file: "process.log".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 加载配置：先读 `ORDERS_CONFIG` 指向的 TOML 文件（可选），再用环境变量覆盖
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) => Self::from_toml_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        base.with_overrides(|name| std::env::var(name).ok())
    }

    /// 从 TOML 文件加载，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
            path: origin.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 用 `lookup` 提供的变量覆盖各字段
    ///
    /// `lookup` 通常是 `std::env::var`，测试中可以传入任意映射。
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("XML_FOLDER") {
            self.xml_folder = v;
        }
        if let Some(v) = lookup("JSON_OUTPUT_FOLDER") {
            self.json_output_folder = v;
        }
        if let Some(v) = lookup("DB_PATH") {
            self.db_path = v;
        }
        if let Some(v) = parse_var(&lookup, "MAX_RETRIES", "usize")? {
            self.max_retries = v;
        }
        if let Some(v) = parse_var(&lookup, "RETRY_DELAY_MS", "u64")? {
            self.retry_delay_ms = v;
        }
        if let Some(v) = lookup("LOG_FILE") {
            self.log_file = v;
        }
        if let Some(v) = parse_var(&lookup, "VERBOSE_LOGGING", "bool")? {
            self.verbose_logging = v;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_retries == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_retries".to_string(),
                reason: "至少需要尝试 1 次".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, var_name: &str, expected_type: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var_name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_match_original_constants() {
        let config = Config::default();
        assert_eq!(config.xml_folder, "xml-files");
        assert_eq!(config.json_output_folder, "json-output");
        assert_eq!(config.db_path, "orders.db");
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay_ms, 0);
        assert_eq!(config.log_file, "process.log");
    }

    #[test]
    fn test_overrides_apply() {
        let config = Config::default()
            .with_overrides(lookup_from(&[
                ("XML_FOLDER", "in"),
                ("MAX_RETRIES", "5"),
                ("VERBOSE_LOGGING", "true"),
            ]))
            .unwrap();
        assert_eq!(config.xml_folder, "in");
        assert_eq!(config.max_retries, 5);
        assert!(config.verbose_logging);
        assert_eq!(config.db_path, "orders.db");
    }

    #[test]
    fn test_invalid_env_value_is_rejected() {
        let err = Config::default()
            .with_overrides(lookup_from(&[("MAX_RETRIES", "three")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EnvVarParseFailed { ref var_name, .. } if var_name == "MAX_RETRIES"
        ));
    }

    #[test]
    fn test_zero_retries_is_rejected() {
        let err = Config::default()
            .with_overrides(lookup_from(&[("MAX_RETRIES", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_toml_partial_file_keeps_defaults() {
        let config = Config::from_toml_str(
            "xml_folder = \"orders\"\nretry_delay_ms = 250\n",
            "orders.toml",
        )
        .unwrap();
        assert_eq!(config.xml_folder, "orders");
        assert_eq!(config.retry_delay_ms, 250);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.json_output_folder, "json-output");
    }

    #[test]
    fn test_toml_parse_error() {
        let err = Config::from_toml_str("max_retries = \"many\"", "bad.toml").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParseFailed { .. }));
    }
}
