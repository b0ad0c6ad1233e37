use thiserror::Error;

/// 应用程序错误类型
#[derive(Error, Debug)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    Io(#[from] std::io::Error),
    /// JSON 序列化错误
    #[error("JSON错误: {0}")]
    Json(#[from] serde_json::Error),
}

/// 单个 XML 文档的提取失败
///
/// 三种失败对调用方一视同仁：记录日志、计为一次失败尝试、可以重试。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// XML 格式错误，无法解析
    #[error("解析错误 {file_name} - {message}")]
    Parse { file_name: String, message: String },
    /// XML 合法但缺少 <Customer> 元素
    #[error("已跳过 {file_name} - 缺少 <Customer> 元素")]
    Validation { file_name: String },
    /// 其他错误（读取失败、编码错误等）
    #[error("未知错误 {file_name} - {message}")]
    Unknown { file_name: String, message: String },
}

impl ExtractError {
    /// 失败类别，用于日志
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::Parse { .. } => "parse",
            ExtractError::Validation { .. } => "validation",
            ExtractError::Unknown { .. } => "unknown",
        }
    }
}

/// 存储层错误
#[derive(Error, Debug)]
pub enum StoreError {
    /// 打开数据库失败
    #[error("无法打开数据库 {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },
    /// 建表失败
    #[error("建表失败: {0}")]
    Schema(#[source] rusqlite::Error),
    /// 写入失败
    #[error("写入 {table} 失败 ({file_name}): {source}")]
    Insert {
        table: &'static str,
        file_name: String,
        #[source]
        source: rusqlite::Error,
    },
    /// 查询失败
    #[error("查询 {table} 失败: {source}")]
    Query {
        table: &'static str,
        #[source]
        source: rusqlite::Error,
    },
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置文件读取失败
    #[error("读取配置文件失败 ({path}): {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 配置值不合法
    #[error("配置项 {field} 不合法: {reason}")]
    InvalidValue { field: String, reason: String },
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_display() {
        let err = ExtractError::Validation {
            file_name: "order.xml".to_string(),
        };
        assert_eq!(err.kind(), "validation");
        assert!(err.to_string().contains("order.xml"));
        assert!(err.to_string().contains("<Customer>"));

        let err = ExtractError::Parse {
            file_name: "bad.xml".to_string(),
            message: "unexpected end of stream".to_string(),
        };
        assert_eq!(err.kind(), "parse");
        assert!(err.to_string().contains("unexpected end of stream"));
    }

    #[test]
    fn test_app_error_from_io_error() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, AppError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }
}
