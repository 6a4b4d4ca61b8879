// ==========================================
// 学籍数据修复引擎 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为，避免"部分连接外键开启/部分不开启"
// - 统一 busy_timeout，减少批处理与前台写入并发时的偶发 busy 错误
// - 提供幂等的建表脚本（测试与独立运行使用）
// ==========================================

use rusqlite::Connection;
use std::path::PathBuf;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 默认数据库路径
///
/// 优先级: 环境变量 SCHOOL_RECONCILE_DB_PATH -> 用户数据目录 -> 当前目录
pub fn get_default_db_path() -> String {
    // 允许通过环境变量显式指定 DB 路径（便于调度平台/CI）
    if let Ok(path) = std::env::var("SCHOOL_RECONCILE_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./school.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("school-reconcile");
        // 确保目录存在
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("school.db");
        }
    }

    path.to_string_lossy().to_string()
}

/// 初始化 schema（CREATE TABLE IF NOT EXISTS，可重复执行）
///
/// 外键列全部可空：引擎的职责正是修复这些缺失的关联
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS department (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT
        );

        CREATE TABLE IF NOT EXISTS level (
            id TEXT PRIMARY KEY,
            level_name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS program (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            department_id TEXT REFERENCES department(id),
            level_id TEXT REFERENCES level(id)
        );

        CREATE TABLE IF NOT EXISTS classroom (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            department_id TEXT REFERENCES department(id),
            program_id TEXT REFERENCES program(id),
            level_id TEXT REFERENCES level(id),
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS student (
            id TEXT PRIMARY KEY,
            department_id TEXT REFERENCES department(id),
            classroom_id TEXT REFERENCES classroom(id),
            program_id TEXT REFERENCES program(id),
            level_id TEXT REFERENCES level(id)
        );

        CREATE INDEX IF NOT EXISTS idx_student_classroom ON student(classroom_id);
        CREATE INDEX IF NOT EXISTS idx_student_program ON student(program_id);
        CREATE INDEX IF NOT EXISTS idx_program_department ON program(department_id);

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL DEFAULT 'global',
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );
        "#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();

        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' \
                 AND name IN ('department', 'level', 'program', 'classroom', 'student', 'config_kv')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 6);
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }
}
