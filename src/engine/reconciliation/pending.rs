// ==========================================
// 关联修复 - dry-run 下的待写入视图
// ==========================================
// 职责: 把本次已解析但未落库的专业系部叠加到只读视图上，
//       使学生专业回填看到与真实运行一致的专业系部
// 红线: 仅用于 dry-run；写方法原样转发（dry-run 不会调用）
// ==========================================

use crate::domain::{Department, Level, Program};
use crate::repository::error::RepositoryResult;
use crate::repository::OrgStore;

use super::report::DepartmentFix;

/// 叠加了待写入系部的专业视图
pub(super) struct PendingDepartmentView<'a, S: OrgStore + ?Sized> {
    inner: &'a S,
    /// 全部专业快照（插入顺序），department_id 已按待写入结果覆盖
    programs: Vec<Program>,
}

impl<'a, S: OrgStore + ?Sized> PendingDepartmentView<'a, S> {
    pub(super) fn load(inner: &'a S, fixes: &[DepartmentFix]) -> RepositoryResult<Self> {
        let mut programs = inner.list_all_programs()?;
        for program in programs.iter_mut().filter(|p| p.department_id.is_none()) {
            if let Some(fix) = fixes.iter().find(|f| f.program_id == program.id) {
                program.department_id = Some(fix.department_id.clone());
            }
        }
        Ok(Self { inner, programs })
    }

    fn first_program(&self, predicate: impl Fn(&Program) -> bool) -> Option<Program> {
        self.programs.iter().find(|p| predicate(*p)).cloned()
    }
}

impl<S: OrgStore + ?Sized> OrgStore for PendingDepartmentView<'_, S> {
    fn list_departments(&self) -> RepositoryResult<Vec<Department>> {
        self.inner.list_departments()
    }

    fn find_department(&self, department_id: &str) -> RepositoryResult<Option<Department>> {
        self.inner.find_department(department_id)
    }

    fn find_level(&self, level_id: &str) -> RepositoryResult<Option<Level>> {
        self.inner.find_level(level_id)
    }

    fn find_program(&self, program_id: &str) -> RepositoryResult<Option<Program>> {
        Ok(self.first_program(|p| p.id == program_id))
    }

    fn list_all_programs(&self) -> RepositoryResult<Vec<Program>> {
        Ok(self.programs.clone())
    }

    fn count_programs(&self) -> RepositoryResult<i64> {
        Ok(self.programs.len() as i64)
    }

    fn count_programs_missing_department(&self) -> RepositoryResult<i64> {
        Ok(self
            .programs
            .iter()
            .filter(|p| p.department_id.is_none())
            .count() as i64)
    }

    fn list_programs_missing_department(&self) -> RepositoryResult<Vec<Program>> {
        Ok(self
            .programs
            .iter()
            .filter(|p| p.department_id.is_none())
            .cloned()
            .collect())
    }

    fn find_program_by_department_level(
        &self,
        department_id: &str,
        level_id: &str,
    ) -> RepositoryResult<Option<Program>> {
        Ok(self.first_program(|p| {
            p.department_id.as_deref() == Some(department_id)
                && p.level_id.as_deref() == Some(level_id)
        }))
    }

    fn find_program_by_department(&self, department_id: &str) -> RepositoryResult<Option<Program>> {
        Ok(self.first_program(|p| p.department_id.as_deref() == Some(department_id)))
    }

    fn list_programs_by_level(&self, level_id: &str) -> RepositoryResult<Vec<Program>> {
        Ok(self
            .programs
            .iter()
            .filter(|p| p.level_id.as_deref() == Some(level_id))
            .cloned()
            .collect())
    }

    fn find_program_by_level(&self, level_id: &str) -> RepositoryResult<Option<Program>> {
        Ok(self.first_program(|p| p.level_id.as_deref() == Some(level_id)))
    }

    fn update_program_department(
        &self,
        program_id: &str,
        department_id: &str,
    ) -> RepositoryResult<()> {
        self.inner.update_program_department(program_id, department_id)
    }
}
