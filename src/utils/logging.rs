/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use crate::config::Config;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;
use tracing::{info, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// 本地时间戳，精确到毫秒
struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// 初始化日志：终端 + 追加写入的日志文件
///
/// 默认级别 info（`verbose_logging` 时为 debug），可用 `RUST_LOG` 覆盖。
pub fn init(config: &Config) -> Result<()> {
    init_log_file(&config.log_file)?;
    subscriber(config)?.try_init().context("日志系统已初始化")?;
    Ok(())
}

/// 构建订阅器但不安装
///
/// `init` 将其设为全局订阅器；测试中可配合 `tracing::subscriber::set_default` 使用。
pub fn subscriber(config: &Config) -> Result<impl Subscriber + Send + Sync + 'static> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("无法打开日志文件: {}", config.log_file))?;

    let default_level = if config.verbose_logging { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    Ok(tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_timer(LocalTimer).with_target(false))
        .with(
            fmt::layer()
                .with_timer(LocalTimer)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        ))
}

/// 在日志文件末尾追加本次运行的标题
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n订单处理日志 - {}\n{}\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .with_context(|| format!("无法写入日志文件: {}", log_file_path))?;
    file.write_all(log_header.as_bytes())?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - XML 订单批处理");
    info!("📁 输入目录: {}", config.xml_folder);
    info!("📤 输出目录: {}", config.json_output_folder);
    info!("🗄️ 数据库: {}", config.db_path);
    info!("🔁 最大尝试次数: {}", config.max_retries);
    info!("{}", "=".repeat(60));
}

/// 记录文件扫描结果
///
/// # 参数
/// - `total`: 文件总数
pub fn log_files_found(total: usize) {
    info!("✓ 找到 {} 个待处理的 XML 文件", total);
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 成功数量
/// - `failed`: 失败数量
/// - `total`: 总数
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(success: usize, failed: usize, total: usize, log_file_path: &str) {
    info!("{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
    info!("日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("<Order><OrderID>", 7), "<Order>...");
        assert_eq!(truncate_text("订单订单订单", 2), "订单...");
    }

    #[test]
    fn test_init_log_file_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("process.log");
        let path_str = path.to_str().unwrap();

        init_log_file(path_str).unwrap();
        init_log_file(path_str).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("订单处理日志").count(), 2);
    }
}
