//! 日志工具模块
//!
//! 提供日志初始化和输出的辅助函数

use crate::config::Config;
use crate::orchestrator::RunStats;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// `RUST_LOG` 优先；否则默认 `info`，`verbose` 时为 `debug`
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 模块拆分模式");
    info!("📊 最大并发文档数: {}", config.max_concurrent_documents);
    info!("🤖 生成模型: {}", config.llm_model_name);
    info!("{}", "=".repeat(60));
}

/// 记录文档扫描结果
pub fn log_documents_found(total: usize, max_concurrent: usize) {
    info!("✓ 找到 {} 个待处理的文档", total);
    info!("📋 同时最多处理 {} 个目录（同一目录内按顺序）", max_concurrent);
}

/// 打印最终统计信息
pub fn print_final_stats(stats: &RunStats) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 完成: {}/{}", stats.completed, stats.documents);
    info!("⏭️ 跳过: {}", stats.skipped);
    info!("❌ 失败: {}", stats.failed);
    info!("📝 写入模块: {}", stats.modules_written);
    info!("{}", "=".repeat(60));
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
