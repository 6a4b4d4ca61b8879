// ==========================================
// 学籍数据修复引擎 - 实体存储接口
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 定义引擎所需的读/写接口（引擎通过构造函数注入，便于测试替身）
// 约束: 所有列表查询按插入顺序返回，首个命中/平票规则依赖该顺序
// ==========================================

use crate::domain::{
    Classroom, ClassroomPopulation, Department, GroupKey, Level, Program, Student, StudentProfile,
};
use crate::repository::error::RepositoryResult;

// ==========================================
// OrgStore - 系部/年级/专业
// ==========================================
pub trait OrgStore: Send + Sync {
    /// 全部系部（插入顺序）
    fn list_departments(&self) -> RepositoryResult<Vec<Department>>;

    fn find_department(&self, department_id: &str) -> RepositoryResult<Option<Department>>;

    fn find_level(&self, level_id: &str) -> RepositoryResult<Option<Level>>;

    fn find_program(&self, program_id: &str) -> RepositoryResult<Option<Program>>;

    /// 全部专业（插入顺序）
    fn list_all_programs(&self) -> RepositoryResult<Vec<Program>>;

    fn count_programs(&self) -> RepositoryResult<i64>;

    fn count_programs_missing_department(&self) -> RepositoryResult<i64>;

    /// 未关联系部的专业（插入顺序）
    fn list_programs_missing_department(&self) -> RepositoryResult<Vec<Program>>;

    /// 首个 department_id 与 level_id 均一致的专业
    fn find_program_by_department_level(
        &self,
        department_id: &str,
        level_id: &str,
    ) -> RepositoryResult<Option<Program>>;

    /// 首个 department_id 一致的专业（忽略年级）
    fn find_program_by_department(&self, department_id: &str) -> RepositoryResult<Option<Program>>;

    /// 指定年级下的全部专业（插入顺序）
    fn list_programs_by_level(&self, level_id: &str) -> RepositoryResult<Vec<Program>>;

    /// 首个指定年级的专业（忽略系部）
    fn find_program_by_level(&self, level_id: &str) -> RepositoryResult<Option<Program>>;

    fn update_program_department(
        &self,
        program_id: &str,
        department_id: &str,
    ) -> RepositoryResult<()>;
}

// ==========================================
// StudentStore - 学生
// ==========================================
pub trait StudentStore: Send + Sync {
    fn count_students(&self) -> RepositoryResult<i64>;

    fn count_students_missing_program(&self) -> RepositoryResult<i64>;

    /// 未关联专业的学生（含所在班级名称与班级系部，插入顺序）
    fn list_students_missing_program(&self) -> RepositoryResult<Vec<StudentProfile>>;

    /// 已关联到指定专业的学生
    fn list_students_by_program(&self, program_id: &str) -> RepositoryResult<Vec<Student>>;

    /// 指定班级的全部学生（插入顺序）
    fn list_students_in_classroom(&self, classroom_id: &str) -> RepositoryResult<Vec<Student>>;

    fn update_student_program(&self, student_id: &str, program_id: &str) -> RepositoryResult<()>;

    fn update_student_classroom(&self, student_id: &str, classroom_id: &str)
        -> RepositoryResult<()>;
}

// ==========================================
// ClassroomStore - 班级
// ==========================================
pub trait ClassroomStore: Send + Sync {
    /// 全部班级人数（人数降序，同人数按插入顺序）
    fn list_classroom_populations(&self) -> RepositoryResult<Vec<ClassroomPopulation>>;

    fn count_classroom_members(&self, classroom_id: &str) -> RepositoryResult<i64>;

    /// (专业, 系部, 年级) 完全一致的首个班级，排除 exclude_id
    ///
    /// 缺失分量按 NULL 匹配（IS 语义）
    fn find_classroom_by_key(
        &self,
        key: &GroupKey,
        exclude_id: &str,
    ) -> RepositoryResult<Option<Classroom>>;

    /// (系部, 年级) 一致的首个班级，排除 exclude_id
    fn find_classroom_by_department_level(
        &self,
        department_id: Option<&str>,
        level_id: Option<&str>,
        exclude_id: &str,
    ) -> RepositoryResult<Option<Classroom>>;

    /// 指定 (年级, 系部) 下已有班级数（用于新班级编号）
    fn count_classrooms_for(
        &self,
        level_id: Option<&str>,
        department_id: Option<&str>,
    ) -> RepositoryResult<i64>;

    fn create_classroom(&self, classroom: &Classroom) -> RepositoryResult<()>;
}

// ==========================================
// EntityStore - 引擎使用的完整存储接口
// ==========================================
pub trait EntityStore: OrgStore + StudentStore + ClassroomStore {}

impl<T> EntityStore for T where T: OrgStore + StudentStore + ClassroomStore {}
