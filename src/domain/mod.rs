// ==========================================
// 学籍数据修复引擎 - 领域模型层
// ==========================================
// 职责: 定义组织实体（系部/专业/年级/班级/学生）与引擎值类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod classroom;
pub mod org;
pub mod student;
pub mod types;

// 重导出核心类型
pub use classroom::{Classroom, ClassroomPopulation};
pub use org::{Department, Level, Program};
pub use student::{Student, StudentProfile};
pub use types::{DepartmentMatchStage, GroupKey, ProgramMatchStage, TargetSource, UNKNOWN_KEY};
