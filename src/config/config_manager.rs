// ==========================================
// 学籍数据修复引擎 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、写入
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::department_rule::DepartmentRule;
use crate::config::reconcile_config_trait::ReconcileConfigReader;
use crate::db::open_sqlite_connection;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入 global scope 配置（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// 保存人工规则表（JSON 序列化）
    pub fn save_department_rules(&self, rules: &[DepartmentRule]) -> RepositoryResult<()> {
        let raw = serde_json::to_string(rules).map_err(|e| RepositoryError::FieldValueError {
            field: config_keys::DEPARTMENT_RULES.to_string(),
            message: e.to_string(),
        })?;
        self.set_global_config_value(config_keys::DEPARTMENT_RULES, &raw)
    }

    /// 从 config_kv 表读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> RepositoryResult<String> {
        Ok(self
            .get_global_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }
}

// ==========================================
// ReconcileConfigReader Trait 实现
// ==========================================
#[async_trait]
impl ReconcileConfigReader for ConfigManager {
    async fn get_hotspot_threshold(&self) -> RepositoryResult<i64> {
        let value = self.get_config_or_default(config_keys::HOTSPOT_THRESHOLD, "100")?;
        Ok(value.trim().parse::<i64>().unwrap_or(100))
    }

    async fn get_min_overlap_score(&self) -> RepositoryResult<i32> {
        let value = self.get_config_or_default(config_keys::MIN_OVERLAP_SCORE, "2")?;
        Ok(value.trim().parse::<i32>().unwrap_or(2))
    }

    async fn get_progress_interval(&self) -> RepositoryResult<usize> {
        let value = self.get_config_or_default(config_keys::PROGRESS_INTERVAL, "100")?;
        Ok(value.trim().parse::<usize>().unwrap_or(100))
    }

    async fn get_report_top_n(&self) -> RepositoryResult<usize> {
        let value = self.get_config_or_default(config_keys::REPORT_TOP_N, "5")?;
        Ok(value.trim().parse::<usize>().unwrap_or(5))
    }

    async fn get_department_rules(&self) -> RepositoryResult<Vec<DepartmentRule>> {
        let raw = match self.get_global_config_value(config_keys::DEPARTMENT_RULES)? {
            Some(v) if !v.trim().is_empty() => v,
            _ => return Ok(Vec::new()),
        };

        // 规则表是运维手写数据，格式错误直接报错，不静默丢弃
        serde_json::from_str(&raw).map_err(|e| RepositoryError::FieldValueError {
            field: config_keys::DEPARTMENT_RULES.to_string(),
            message: e.to_string(),
        })
    }

    async fn get_dry_run(&self) -> RepositoryResult<bool> {
        let value = self.get_config_or_default(config_keys::DRY_RUN, "false")?;
        Ok(matches!(
            value.trim().to_lowercase().as_str(),
            "true" | "1" | "yes"
        ))
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 重分配
    pub const HOTSPOT_THRESHOLD: &str = "hotspot_threshold";
    pub const REPORT_TOP_N: &str = "report_top_n";

    // 系部匹配
    pub const MIN_OVERLAP_SCORE: &str = "min_overlap_score";
    pub const DEPARTMENT_RULES: &str = "department_rules"; // 人工规则表 (JSON)

    // 运行控制
    pub const PROGRESS_INTERVAL: &str = "progress_interval";
    pub const DRY_RUN: &str = "dry_run";
}
