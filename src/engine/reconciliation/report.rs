use crate::domain::{DepartmentMatchStage, ProgramMatchStage};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// LinkSummary - 单类关联的前后统计
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinkSummary {
    /// 运行前实体总数
    pub total_before: i64,

    /// 运行前缺失关联数
    pub missing_before: i64,

    /// 修复数 = missing_before - missing_after（复查口径，不小于 0）
    pub fixed_count: i64,

    /// 运行后缺失关联数
    pub missing_after: i64,

    /// 本次解析成功的实体数（dry-run 时为"将会修复"的数量）
    pub resolved_count: i64,
}

impl LinkSummary {
    pub fn new(total_before: i64, missing_before: i64, missing_after: i64, resolved_count: i64) -> Self {
        Self {
            total_before,
            missing_before,
            fixed_count: (missing_before - missing_after).max(0),
            missing_after,
            resolved_count,
        }
    }
}

// ==========================================
// DepartmentFix - 专业回填系部的审计记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentFix {
    pub program_id: String,
    pub program_name: String,
    pub department_id: String,
    pub department_name: String,
    pub stage: DepartmentMatchStage,
    pub score: Option<i32>,
}

// ==========================================
// ReconcileReport - 关联修复报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// 专业 -> 系部
    pub programs: LinkSummary,

    /// 学生 -> 专业
    pub students: LinkSummary,

    /// 每个被修复专业的命中阶段
    pub department_fixes: Vec<DepartmentFix>,

    /// 本次仍无法解析的专业
    pub unresolved_program_ids: Vec<String>,

    /// 学生专业回填按阶段计数
    pub student_stage_counts: BTreeMap<ProgramMatchStage, i64>,

    /// 本次仍无法解析的学生
    pub unresolved_student_ids: Vec<String>,

    pub dry_run: bool,
    pub started_at: NaiveDateTime,
    pub finished_at: NaiveDateTime,
}
