//! 批量订单处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量文件的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：创建输出目录、打开数据库
//! 2. **文件扫描**：列出输入目录下所有 `*.xml` 文件
//! 3. **逐个处理**：一次只处理一个文件，单个文件失败不影响其他文件
//! 4. **结果落地**：成功的订单写入 processed_data 并输出 json 文件
//! 5. **全局统计**：汇总所有文件的处理结果
//!
//! ## 设计特点
//!
//! - **资源所有者**：唯一持有 `OrderStore` 的模块
//! - **向下委托**：单个文件的读取、重试、提取交给 `OrderFlow`

use crate::config::Config;
use crate::models::OrderRecord;
use crate::services::{JsonWriter, OrderStore};
use crate::utils::logging;
use crate::workflow::{FileCtx, OrderFlow};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    store: OrderStore,
    flow: OrderFlow,
    writer: JsonWriter,
}

/// 处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchStats {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config);

        let writer = JsonWriter::new(&config.json_output_folder);
        writer
            .ensure_dir()
            .await
            .with_context(|| format!("无法创建输出目录: {}", config.json_output_folder))?;

        let store = OrderStore::open(&config.db_path)?;
        let flow = OrderFlow::new(&config);

        Ok(Self {
            config,
            store,
            flow,
            writer,
        })
    }

    /// 数据库句柄
    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<BatchStats> {
        info!("📁 正在扫描待处理的文件...");
        let files = list_xml_files(Path::new(&self.config.xml_folder)).await?;

        if files.is_empty() {
            warn!("⚠️ 没有找到待处理的XML文件，程序结束");
            return Ok(BatchStats::default());
        }

        logging::log_files_found(files.len());

        let mut stats = BatchStats {
            total: files.len(),
            ..Default::default()
        };

        for (idx, path) in files.iter().enumerate() {
            let file_name = file_name_of(path);
            let ctx = FileCtx::new(file_name, idx + 1, stats.total);

            if self.process_file(path, &ctx).await {
                stats.success += 1;
            } else {
                stats.failed += 1;
            }
        }

        logging::print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            &self.config.log_file,
        );

        Ok(stats)
    }

    /// 处理单个文件，返回是否成功
    async fn process_file(&self, path: &Path, ctx: &FileCtx) -> bool {
        info!("{} 📄 开始处理: {}", ctx, ctx.file_name);

        let Some(order) = self.flow.run(&self.store, path, ctx).await else {
            return false;
        };

        match self.persist(&order, ctx).await {
            Ok(output) => {
                info!("{} ✓ 已输出: {}", ctx, output.display());
                true
            }
            Err(e) => {
                error!("{} ❌ 保存结果失败 {}: {:#}", ctx, ctx.file_name, e);
                false
            }
        }
    }

    /// 先写 processed_data，再写 json 文件
    async fn persist(&self, order: &OrderRecord, ctx: &FileCtx) -> Result<PathBuf> {
        let json = order.to_json()?;
        self.store.store_processed(&ctx.file_name, &json)?;
        let output = self.writer.write(&ctx.file_name, order).await?;
        Ok(output)
    }
}

/// 列出目录下的 `*.xml` 文件（不递归，跳过隐藏文件），按文件名排序
///
/// 目录不存在时返回空列表。
pub async fn list_xml_files(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        warn!("⚠️ 文件夹不存在: {}", folder.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    let mut entries = fs::read_dir(folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder.display()))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_xml = path.extension().and_then(|s| s.to_str()) == Some("xml");
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if !is_xml || hidden {
            continue;
        }
        // 跟随符号链接；无法获取元数据的条目直接跳过
        let is_file = fs::metadata(&path).await.map(|m| m.is_file()).unwrap_or(false);
        if is_file {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_xml_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.xml", "a.xml", "notes.txt", "upper.XML", ".hidden.xml"] {
            std::fs::write(dir.path().join(name), "<Order/>").unwrap();
        }
        std::fs::create_dir(dir.path().join("dir.xml")).unwrap();

        let files = list_xml_files(dir.path()).await.unwrap();
        let names: Vec<String> = files.iter().map(|p| file_name_of(p)).collect();
        assert_eq!(names, vec!["a.xml", "b.xml"]);
    }

    #[tokio::test]
    async fn test_list_xml_files_missing_folder_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let files = list_xml_files(&dir.path().join("nope")).await.unwrap();
        assert!(files.is_empty());
    }
}
