// ==========================================
// 学籍数据修复引擎 - SQLite 实体存储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化,防止 SQL 注入
// 约束: 列表查询统一 ORDER BY rowid（插入顺序）
// ==========================================

mod classroom;
mod org;
mod student;

#[cfg(test)]
mod tests;

use crate::db::open_sqlite_connection;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// 时间戳存储格式（与 schema 默认值 datetime('now') 一致）
const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ==========================================
// SqliteEntityStore - 基于 SQLite 的实体存储
// ==========================================
/// 实现 OrgStore / StudentStore / ClassroomStore（即 EntityStore）
pub struct SqliteEntityStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteEntityStore {
    /// 打开数据库文件并应用统一 PRAGMA
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建存储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

/// 单行写入的影响行数检查
fn ensure_affected(affected: usize, entity: &str, id: &str) -> RepositoryResult<()> {
    if affected == 0 {
        return Err(RepositoryError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        });
    }
    Ok(())
}
