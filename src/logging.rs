// ==========================================
// 日志系统初始化
// ==========================================
// 工具: tracing + tracing-subscriber (env-filter)
// 输出: 人读文本（默认）/ JSON 行（--json-log）/ 测试捕获
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 未设置 RUST_LOG 时的默认过滤级别
const DEFAULT_FILTER: &str = "info";

/// RUST_LOG 优先，缺失或非法时回落到默认级别
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// 初始化文本日志
///
/// # 环境变量
/// - RUST_LOG: 例如 `RUST_LOG=school_reconcile::engine=debug`
pub fn init() {
    fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// 初始化 JSON 行日志（供调度平台采集）
pub fn init_json() {
    fmt()
        .json()
        .with_env_filter(env_filter())
        .with_target(true)
        .init();
}

/// 测试用日志：固定 debug 级别，输出交给测试框架捕获；重复调用无副作用
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
