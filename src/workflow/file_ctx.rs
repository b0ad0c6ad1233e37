//! 文件处理上下文
//!
//! 封装"我正在处理第几个文件、叫什么"这一信息

use std::fmt::Display;

/// 文件处理上下文
#[derive(Debug, Clone)]
pub struct FileCtx {
    /// 文件名（不含目录）
    pub file_name: String,

    /// 文件在本批中的索引（从1开始，仅用于日志显示）
    pub file_index: usize,

    /// 本批文件总数
    pub total: usize,
}

impl FileCtx {
    /// 创建新的文件上下文
    pub fn new(file_name: impl Into<String>, file_index: usize, total: usize) -> Self {
        Self {
            file_name: file_name.into(),
            file_index,
            total,
        }
    }
}

impl Display for FileCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[文件 {}/{}]", self.file_index, self.total)
    }
}
