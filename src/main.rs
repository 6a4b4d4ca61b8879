// ==========================================
// 学籍数据修复引擎 - 批处理入口
// ==========================================
// 用法:
//   school-reconcile [db_path] [reconcile|redistribute|all] [--dry-run] [--json-log]
//
// 说明: 由外部调度（cron/CI）触发；超时、重试由调度方负责
// ==========================================

use anyhow::{Context, Result};
use school_reconcile::config::{ConfigManager, EngineConfig};
use school_reconcile::db::{get_default_db_path, init_schema, open_sqlite_connection};
use school_reconcile::engine::{BatchOrchestrator, RunMode};
use school_reconcile::repository::{EntityStore, SqliteEntityStore};
use std::sync::{Arc, Mutex};

/// 命令行参数
struct CliArgs {
    db_path: String,
    mode: RunMode,
    dry_run: bool,
    json_log: bool,
}

fn parse_args() -> Result<CliArgs> {
    let mut positional = Vec::new();
    let mut dry_run = false;
    let mut json_log = false;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--dry-run" => dry_run = true,
            "--json-log" => json_log = true,
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let db_path = positional
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(get_default_db_path);

    let mode = match positional.next() {
        Some(raw) => raw.parse::<RunMode>().map_err(anyhow::Error::msg)?,
        None => RunMode::All,
    };

    Ok(CliArgs {
        db_path,
        mode,
        dry_run,
        json_log,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = parse_args()?;

    // 初始化日志系统
    if args.json_log {
        school_reconcile::logging::init_json();
    } else {
        school_reconcile::logging::init();
    }

    tracing::info!("==================================================");
    tracing::info!("{} v{}", school_reconcile::APP_NAME, school_reconcile::VERSION);
    tracing::info!("使用数据库: {}", args.db_path);
    tracing::info!("==================================================");

    let conn = open_sqlite_connection(&args.db_path)
        .with_context(|| format!("无法打开数据库: {}", args.db_path))?;
    init_schema(&conn).context("初始化 schema 失败")?;
    let conn = Arc::new(Mutex::new(conn));

    // 加载配置（命令行 --dry-run 优先）
    let config_manager = ConfigManager::from_connection(conn.clone());
    let mut config = EngineConfig::load(&config_manager)
        .await
        .context("加载配置失败")?;
    if args.dry_run {
        config = config.with_dry_run(true);
    }

    let store: Arc<dyn EntityStore> = Arc::new(SqliteEntityStore::from_connection(conn));
    let orchestrator = BatchOrchestrator::new(store, config);

    // 批处理为阻塞调用，放入阻塞线程池执行
    let mode = args.mode;
    let result = tokio::task::spawn_blocking(move || orchestrator.run(mode))
        .await
        .context("批处理线程异常退出")?
        .context("批处理失败")?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
