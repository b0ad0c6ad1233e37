//! 订单处理流程 - 流程层
//!
//! 核心职责：定义"一个文件"的提取流程（带重试）
//!
//! 每次尝试：
//! 1. 重新读取文件
//! 2. 保存原始 XML（无论能否解析；保存失败则本次尝试失败）
//! 3. 提取订单
//!
//! 文件可能还在写入中，所以每次尝试都重新读取，不缓存内容。

use std::path::Path;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::config::Config;
use crate::error::ExtractError;
use crate::models::OrderRecord;
use crate::services::{extract_order, OrderStore};
use crate::utils::logging::truncate_text;
use crate::workflow::file_ctx::FileCtx;

/// 订单处理流程
///
/// - 不持有存储，由编排层传入
/// - 不写输出文件
pub struct OrderFlow {
    max_retries: usize,
    retry_delay: Duration,
}

impl OrderFlow {
    /// 创建新的订单处理流程
    pub fn new(config: &Config) -> Self {
        Self::with_retries(config.max_retries, Duration::from_millis(config.retry_delay_ms))
    }

    pub fn with_retries(max_retries: usize, retry_delay: Duration) -> Self {
        Self {
            max_retries,
            retry_delay,
        }
    }

    /// 最多尝试 `max_retries` 次
    ///
    /// # 返回
    /// 成功返回订单；全部失败返回 None（失败已记录日志）
    pub async fn run(&self, store: &OrderStore, path: &Path, ctx: &FileCtx) -> Option<OrderRecord> {
        for attempt in 1..=self.max_retries {
            match self.attempt(store, path, &ctx.file_name).await {
                Ok(order) => {
                    debug!("{} 第 {} 次尝试成功: {}", ctx, attempt, ctx.file_name);
                    return Some(order);
                }
                Err(e) => {
                    error!("{} ❌ [{}] {}", ctx, e.kind(), e);
                    warn!(
                        "{} 🔁 重试 {} ({}/{})",
                        ctx, ctx.file_name, attempt, self.max_retries
                    );
                }
            }

            if attempt < self.max_retries && !self.retry_delay.is_zero() {
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        error!(
            "{} ❌ 处理 {} 失败，已重试 {} 次",
            ctx, ctx.file_name, self.max_retries
        );
        None
    }

    /// 单次尝试：读取 → 保存原始数据 → 提取
    async fn attempt(
        &self,
        store: &OrderStore,
        path: &Path,
        file_name: &str,
    ) -> Result<OrderRecord, ExtractError> {
        let xml = read_document(path, file_name).await?;
        debug!("读取 {}: {}", file_name, truncate_text(&xml, 80));

        // 原始数据没有落库就不继续提取，本次尝试按 Unknown 处理
        store
            .store_raw(file_name, &xml)
            .map_err(|e| ExtractError::Unknown {
                file_name: file_name.to_string(),
                message: e.to_string(),
            })?;

        extract_order(file_name, &xml)
    }
}

/// 读取文档文本，读取失败与编码错误都归为 Unknown
async fn read_document(path: &Path, file_name: &str) -> Result<String, ExtractError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ExtractError::Unknown {
            file_name: file_name.to_string(),
            message: e.to_string(),
        })?;
    String::from_utf8(bytes).map_err(|e| ExtractError::Unknown {
        file_name: file_name.to_string(),
        message: e.to_string(),
    })
}
