//! # XML Order Ingest
//!
//! 批量读取 XML 订单文件，提取订单号、客户、商品行，
//! 原始 XML 与提取后的 JSON 都写入 SQLite，并为每个文件输出一个 json 文件。
//!
//! ## 架构设计
//!
//! ### ① 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个文档
//! - `extractor` - XML → `OrderRecord`，纯函数
//! - `OrderStore` - raw_data / processed_data 追加写
//! - `JsonWriter` - 写 json 文件能力
//!
//! ### ② 流程层（Workflow）
//! - `workflow/` - 定义"一个文件"的完整处理流程
//! - `FileCtx` - 上下文封装（文件名 + 序号）
//! - `OrderFlow` - 读取 → 保存原始数据 → 提取，带重试
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 扫描目录，逐个处理文件，汇总统计
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, ConfigError, ExtractError, StoreError};
pub use models::{Customer, OrderRecord, Product};
pub use orchestrator::{App, BatchStats};
pub use services::{extract_order, JsonWriter, OrderStore};
pub use workflow::{FileCtx, OrderFlow};
