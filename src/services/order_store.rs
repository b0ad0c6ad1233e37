//! 订单存储服务 - 业务能力层
//!
//! SQLite 追加写日志：raw_data 记录每次读取的原始 XML，
//! processed_data 记录提取成功的 JSON。只有插入，没有更新和删除。

use crate::error::StoreError;
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::debug;

const CREATE_RAW_DATA_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS raw_data (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    file_name TEXT,
    xml_content TEXT
)
"#;

const CREATE_PROCESSED_DATA_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS processed_data (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    file_name TEXT,
    json_content TEXT
)
"#;

/// raw_data 表的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub id: i64,
    pub file_name: String,
    pub xml_content: String,
}

/// processed_data 表的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedRecord {
    pub id: i64,
    pub file_name: String,
    pub json_content: String,
}

/// 订单存储
///
/// 每次插入都在自动提交模式下执行，返回前已经落盘。
pub struct OrderStore {
    conn: Connection,
}

impl OrderStore {
    /// 打开（或创建）数据库并建表
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Self::with_connection(conn)
    }

    /// 内存数据库，用于测试
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::Open {
            path: ":memory:".to_string(),
            source,
        })?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(CREATE_RAW_DATA_TABLE)
            .map_err(StoreError::Schema)?;
        conn.execute_batch(CREATE_PROCESSED_DATA_TABLE)
            .map_err(StoreError::Schema)?;
        Ok(Self { conn })
    }

    /// 保存原始 XML，返回生成的 id
    pub fn store_raw(&self, file_name: &str, xml_content: &str) -> Result<i64, StoreError> {
        self.conn
            .execute(
                "INSERT INTO raw_data (file_name, xml_content) VALUES (?1, ?2)",
                params![file_name, xml_content],
            )
            .map_err(|source| StoreError::Insert {
                table: "raw_data",
                file_name: file_name.to_string(),
                source,
            })?;
        let id = self.conn.last_insert_rowid();
        debug!("raw_data #{} <- {} ({} 字节)", id, file_name, xml_content.len());
        Ok(id)
    }

    /// 保存提取后的 JSON，返回生成的 id
    pub fn store_processed(&self, file_name: &str, json_content: &str) -> Result<i64, StoreError> {
        self.conn
            .execute(
                "INSERT INTO processed_data (file_name, json_content) VALUES (?1, ?2)",
                params![file_name, json_content],
            )
            .map_err(|source| StoreError::Insert {
                table: "processed_data",
                file_name: file_name.to_string(),
                source,
            })?;
        let id = self.conn.last_insert_rowid();
        debug!("processed_data #{} <- {}", id, file_name);
        Ok(id)
    }

    /// 按 id 顺序列出 raw_data
    pub fn list_raw(&self) -> Result<Vec<RawRecord>, StoreError> {
        let query_err = |source| StoreError::Query {
            table: "raw_data",
            source,
        };
        let mut stmt = self
            .conn
            .prepare("SELECT id, file_name, xml_content FROM raw_data ORDER BY id")
            .map_err(query_err)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(RawRecord {
                    id: row.get(0)?,
                    file_name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    xml_content: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                })
            })
            .map_err(query_err)?;
        let records = rows.collect::<Result<Vec<_>, _>>().map_err(query_err)?;
        Ok(records)
    }

    /// 按 id 顺序列出 processed_data
    pub fn list_processed(&self) -> Result<Vec<ProcessedRecord>, StoreError> {
        let query_err = |source| StoreError::Query {
            table: "processed_data",
            source,
        };
        let mut stmt = self
            .conn
            .prepare("SELECT id, file_name, json_content FROM processed_data ORDER BY id")
            .map_err(query_err)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ProcessedRecord {
                    id: row.get(0)?,
                    file_name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    json_content: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                })
            })
            .map_err(query_err)?;
        let records = rows.collect::<Result<Vec<_>, _>>().map_err(query_err)?;
        Ok(records)
    }
}
