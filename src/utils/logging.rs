/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::workflow::BroadcastStats;

/// 初始化日志订阅器
///
/// `RUST_LOG` 优先；否则默认 info，`verbose` 时为 debug。
/// 重复调用是安全的（测试中会多次调用）。
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
    info!(
        "🚀 程序启动 - 解说广播模式 ({})",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 平台地址: {}", config.api_base_url);
    info!(
        "🔑 鉴权: {}",
        if config.api_key.is_some() { "已配置" } else { "未配置" }
    );
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(session_id: &str, stats: &BroadcastStats) {
    info!("\n{}", "=".repeat(60));
    info!("📊 会话 {} 广播完成统计", session_id);
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 发帖: {}", stats.posted);
    info!("💬 评论: {}", stats.commented);
    info!("⏭️ 跳过: {}", stats.skipped);
    info!("❌ 失败: {}", stats.failed);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
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
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("hello world", 5), "hello...");
        assert_eq!(truncate_text("龙虾龙虾龙虾", 2), "龙虾...");
    }
}
