// ==========================================
// 学籍数据修复引擎 - 引擎层
// ==========================================
// 职责: 关联修复与班级重分配的业务规则,不拼 SQL
// 红线: Engine 不拼 SQL, 每次修复必须输出命中阶段
// 红线: 严格顺序执行（首个命中/平票规则依赖确定的迭代顺序）
// ==========================================

pub mod department_resolver;
pub mod error;
pub mod orchestrator;
pub mod program_resolver;
pub mod reconciliation;
pub mod redistribution;
pub mod token_matcher;

// 重导出核心引擎
pub use department_resolver::{DepartmentMatch, DepartmentResolver};
pub use error::{EngineError, EngineResult};
pub use orchestrator::{BatchOrchestrator, BatchResult, RunMode};
pub use program_resolver::{ProgramMatch, ProgramResolver};
pub use reconciliation::{DepartmentFix, LinkSummary, ReconcileReport, ReconciliationEngine};
pub use redistribution::{GroupOutcome, RedistributionEngine, RedistributionReport};
pub use token_matcher::{contains_substring, token_overlap_score};
