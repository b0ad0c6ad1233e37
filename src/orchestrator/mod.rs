//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<PathBuf>)
//!     ↓
//! workflow::OrderFlow (处理单个文件，带重试)
//!     ↓
//! services (能力层：extractor / order_store / json_writer)
//! ```
//!
//! ## 设计原则
//!
//! 1. **资源隔离**：只有编排层持有 OrderStore
//! 2. **向下依赖**：编排层 → workflow → services
//! 3. **失败隔离**：单个文件失败只记录日志，不中断批处理

pub mod batch_processor;

pub use batch_processor::{list_xml_files, App, BatchStats};
