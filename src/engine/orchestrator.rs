// ==========================================
// 学籍数据修复引擎 - 批处理编排器
// ==========================================
// 用途: 协调关联修复与班级重分配的执行顺序
// 顺序: 先修复（分组键依赖学生专业/系部/年级尽量完整），再重分配
// ==========================================

use crate::config::EngineConfig;
use crate::engine::error::EngineResult;
use crate::engine::reconciliation::{ReconcileReport, ReconciliationEngine};
use crate::engine::redistribution::{RedistributionEngine, RedistributionReport};
use crate::repository::EntityStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

// ==========================================
// RunMode - 运行模式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    Reconcile,
    Redistribute,
    All,
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reconcile" => Ok(RunMode::Reconcile),
            "redistribute" => Ok(RunMode::Redistribute),
            "all" => Ok(RunMode::All),
            other => Err(format!("未知运行模式: {}", other)),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Reconcile => write!(f, "reconcile"),
            RunMode::Redistribute => write!(f, "redistribute"),
            RunMode::All => write!(f, "all"),
        }
    }
}

// ==========================================
// BatchResult - 批处理结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub mode: RunMode,
    pub reconcile: Option<ReconcileReport>,
    pub redistribute: Option<RedistributionReport>,
}

// ==========================================
// BatchOrchestrator - 批处理编排器
// ==========================================
pub struct BatchOrchestrator {
    reconciliation: ReconciliationEngine,
    redistribution: RedistributionEngine,
}

impl BatchOrchestrator {
    /// 创建编排器（两个引擎共享同一存储与配置）
    pub fn new(store: Arc<dyn EntityStore>, config: EngineConfig) -> Self {
        Self {
            reconciliation: ReconciliationEngine::new(store.clone(), config.clone()),
            redistribution: RedistributionEngine::new(store, config),
        }
    }

    pub fn reconcile(&self) -> EngineResult<ReconcileReport> {
        self.reconciliation.reconcile()
    }

    pub fn redistribute(&self) -> EngineResult<RedistributionReport> {
        self.redistribution.redistribute()
    }

    /// 按模式执行；任一步骤的存储错误立即中止
    pub fn run(&self, mode: RunMode) -> EngineResult<BatchResult> {
        info!(mode = %mode, "批处理开始");

        let reconcile = match mode {
            RunMode::Reconcile | RunMode::All => Some(self.reconcile()?),
            RunMode::Redistribute => None,
        };

        let redistribute = match mode {
            RunMode::Redistribute | RunMode::All => Some(self.redistribute()?),
            RunMode::Reconcile => None,
        };

        info!(mode = %mode, "批处理结束");

        Ok(BatchResult {
            mode,
            reconcile,
            redistribute,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_mode_parse() {
        assert_eq!("reconcile".parse::<RunMode>(), Ok(RunMode::Reconcile));
        assert_eq!(" ALL ".parse::<RunMode>(), Ok(RunMode::All));
        assert_eq!("redistribute".parse::<RunMode>(), Ok(RunMode::Redistribute));
        assert!("rebuild".parse::<RunMode>().is_err());
    }
}
