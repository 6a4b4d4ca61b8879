// ==========================================
// 学籍数据修复引擎 - 领域类型定义
// ==========================================
// 职责: 匹配阶段 / 分组键 / 目标来源等值类型
// 红线: 每次修复都必须能说明由哪一阶段命中（可审计）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 分组键中缺失分量的占位值
pub const UNKNOWN_KEY: &str = "unknown";

// ==========================================
// 系部匹配阶段 (Department Match Stage)
// ==========================================
// 顺序即优先级: 先命中者胜出
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DepartmentMatchStage {
    ManualRule,         // 人工规则表
    NameSubstring,      // 系部名为专业名子串
    DescriptionSubstring, // 系部名为专业描述子串
    PartialToken,       // 系部名词元为专业名子串
    TokenOverlap,       // 词元重叠评分兜底
    StudentMajority,    // 关联学生系部多数票
}

impl fmt::Display for DepartmentMatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepartmentMatchStage::ManualRule => write!(f, "MANUAL_RULE"),
            DepartmentMatchStage::NameSubstring => write!(f, "NAME_SUBSTRING"),
            DepartmentMatchStage::DescriptionSubstring => write!(f, "DESCRIPTION_SUBSTRING"),
            DepartmentMatchStage::PartialToken => write!(f, "PARTIAL_TOKEN"),
            DepartmentMatchStage::TokenOverlap => write!(f, "TOKEN_OVERLAP"),
            DepartmentMatchStage::StudentMajority => write!(f, "STUDENT_MAJORITY"),
        }
    }
}

// ==========================================
// 专业匹配阶段 (Program Match Stage)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgramMatchStage {
    DepartmentAndLevel, // 系部 + 年级精确匹配
    DepartmentOnly,     // 仅系部（忽略年级）
    ClassroomName,      // 专业名为班级名子串
    LevelOnly,          // 仅年级兜底（置信度最低）
}

impl fmt::Display for ProgramMatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramMatchStage::DepartmentAndLevel => write!(f, "DEPARTMENT_AND_LEVEL"),
            ProgramMatchStage::DepartmentOnly => write!(f, "DEPARTMENT_ONLY"),
            ProgramMatchStage::ClassroomName => write!(f, "CLASSROOM_NAME"),
            ProgramMatchStage::LevelOnly => write!(f, "LEVEL_ONLY"),
        }
    }
}

// ==========================================
// 目标班级来源 (Target Source)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetSource {
    ExactKey,        // (专业, 系部, 年级) 完全一致的既有班级
    DepartmentLevel, // (系部, 年级) 一致的既有班级
    Created,         // 新建班级
}

impl fmt::Display for TargetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetSource::ExactKey => write!(f, "EXACT_KEY"),
            TargetSource::DepartmentLevel => write!(f, "DEPARTMENT_LEVEL"),
            TargetSource::Created => write!(f, "CREATED"),
        }
    }
}

// ==========================================
// GroupKey - 重分配复合分组键
// ==========================================
// (program_id, department_id, level_id)，缺失分量以 None 表示
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub program_id: Option<String>,
    pub department_id: Option<String>,
    pub level_id: Option<String>,
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.program_id.as_deref().unwrap_or(UNKNOWN_KEY),
            self.department_id.as_deref().unwrap_or(UNKNOWN_KEY),
            self.level_id.as_deref().unwrap_or(UNKNOWN_KEY)
        )
    }
}
