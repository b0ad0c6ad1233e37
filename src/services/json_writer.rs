//! JSON 写入服务 - 业务能力层
//!
//! 只负责"把订单写成 json 文件"能力，不关心流程

use crate::error::AppResult;
use crate::models::OrderRecord;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// JSON 写入服务
///
/// 职责：
/// - 输出文件与输入文件同名，扩展名换成 `.json`
/// - 4 空格缩进
/// - 输出目录不存在时自动创建
pub struct JsonWriter {
    output_dir: PathBuf,
}

impl JsonWriter {
    /// 创建新的 JSON 写入服务
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 确保输出目录存在
    pub async fn ensure_dir(&self) -> AppResult<()> {
        fs::create_dir_all(&self.output_dir).await?;
        Ok(())
    }

    /// 输入文件对应的输出路径
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir
            .join(Path::new(file_name).with_extension("json"))
    }

    /// 写入订单
    ///
    /// # 返回
    /// 返回写入的文件路径
    pub async fn write(&self, file_name: &str, order: &OrderRecord) -> AppResult<PathBuf> {
        let path = self.output_path(file_name);
        let content = order.to_pretty_json()?;

        debug!("写入 JSON: {} ({} 字节)", path.display(), content.len());

        self.ensure_dir().await?;
        fs::write(&path, content).await?;

        Ok(path)
    }
}
