use anyhow::Result;
use xml_order_ingest::utils::logging;
use xml_order_ingest::{App, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logging::init(&config)?;

    // 初始化并运行应用；单个文件失败不影响退出码
    let _stats = App::initialize(config).await?.run().await?;

    Ok(())
}
