// ==========================================
// 学籍数据修复引擎 - 关联修复编排
// ==========================================
// 流程: 统计 -> 专业回填系部 -> 学生回填专业 -> 复查统计
// 红线: 只处理仍缺失关联的实体（重复运行安全）
// 红线: 不做事务包裹；中途失败时已写入部分保留，不回滚不重试
// ==========================================

mod core;
mod pending;
mod report;

pub use core::ReconciliationEngine;
pub use report::{DepartmentFix, LinkSummary, ReconcileReport};
