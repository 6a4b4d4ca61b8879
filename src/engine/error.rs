// ==========================================
// 学籍数据修复引擎 - 引擎层错误类型
// ==========================================
// 说明:
// - 单个实体无法匹配不是错误，只计入未解决数
// - 存储错误原样上抛并中止本次运行（不重试、不回滚已写入部分）
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("存储不可用: {0}")]
    Store(#[from] RepositoryError),

    #[error("配置无效: {0}")]
    InvalidConfig(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
