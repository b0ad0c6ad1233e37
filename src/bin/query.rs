//! 查看数据库内容：列出 raw_data 与 processed_data 的所有行

use anyhow::{Context, Result};
use xml_order_ingest::{Config, OrderStore};

fn main() -> Result<()> {
    let config = Config::load()?;
    let store = OrderStore::open(&config.db_path)
        .with_context(|| format!("无法打开数据库: {}", config.db_path))?;

    println!("Raw XML Data:");
    for row in store.list_raw()? {
        println!("({}, {:?}, {:?})", row.id, row.file_name, row.xml_content);
    }

    println!("\nProcessed JSON Data:");
    for row in store.list_processed()? {
        println!("({}, {:?}, {:?})", row.id, row.file_name, row.json_content);
    }

    Ok(())
}
