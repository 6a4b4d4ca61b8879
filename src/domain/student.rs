// ==========================================
// 学籍数据修复引擎 - 学生实体
// ==========================================
// 职责: 学生主记录 + 引擎读取用的关联视图
// 红线: 引擎只改写 program_id（修复）与 classroom_id（重分配）
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Student - 学生
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub department_id: Option<String>,
    pub classroom_id: Option<String>,
    pub program_id: Option<String>,
    pub level_id: Option<String>,
}

// ==========================================
// StudentProfile - 学生 + 所在班级信息
// ==========================================
// 对齐: student LEFT JOIN classroom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub student: Student,
    pub classroom_name: Option<String>,
    pub classroom_department_id: Option<String>,
}

impl StudentProfile {
    /// 学生有效系部: 本人系部，缺失时回退到所在班级的系部
    pub fn effective_department_id(&self) -> Option<&str> {
        self.student
            .department_id
            .as_deref()
            .or(self.classroom_department_id.as_deref())
    }
}
