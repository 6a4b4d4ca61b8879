// ==========================================
// 学籍数据修复引擎 - 班级实体
// ==========================================
// 职责: 班级主记录 + 人数统计视图
// 说明: member_count 为派生值（COUNT(student)），不落库
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// Classroom - 班级
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classroom {
    pub id: String,
    pub name: String,
    pub department_id: Option<String>,
    pub program_id: Option<String>,
    pub level_id: Option<String>,
    pub created_at: NaiveDateTime,
}

// ==========================================
// ClassroomPopulation - 班级人数快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassroomPopulation {
    pub classroom_id: String,
    pub name: String,
    pub member_count: i64,
}
