// ==========================================
// 学籍数据修复引擎 - 专业解析器
// ==========================================
// 职责: 为缺失 program_id 的学生推断专业
// 优先级: 系部+年级 -> 仅系部 -> 班级名子串 -> 仅年级
// 红线: 阶段 1/3/4 返回的专业年级必须与学生年级一致（阶段 2 有意忽略年级）
// ==========================================

use crate::domain::{Program, ProgramMatchStage, StudentProfile};
use crate::engine::error::EngineResult;
use crate::engine::token_matcher::contains_substring;
use crate::repository::OrgStore;
use serde::{Deserialize, Serialize};

/// 专业解析结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramMatch {
    pub program_id: String,
    pub program_name: String,
    pub stage: ProgramMatchStage,
}

impl ProgramMatch {
    fn new(program: Program, stage: ProgramMatchStage) -> Self {
        Self {
            program_id: program.id,
            program_name: program.name,
            stage,
        }
    }
}

// ==========================================
// ProgramResolver - 专业解析器
// ==========================================
// 无状态: 每次解析都直接查询存储
pub struct ProgramResolver<'a, S: OrgStore + ?Sized> {
    programs: &'a S,
}

impl<'a, S: OrgStore + ?Sized> ProgramResolver<'a, S> {
    pub fn new(programs: &'a S) -> Self {
        Self { programs }
    }

    /// 按优先级解析学生专业，先返回非空结果者胜出
    ///
    /// 缺失字段视为"未知"并落入下一阶段，不报错
    pub fn resolve(&self, profile: &StudentProfile) -> EngineResult<Option<ProgramMatch>> {
        let department_id = profile.effective_department_id();
        let level_id = profile.student.level_id.as_deref();

        // 1) 系部 + 年级精确匹配
        if let (Some(dept), Some(level)) = (department_id, level_id) {
            if let Some(p) = self.programs.find_program_by_department_level(dept, level)? {
                return Ok(Some(ProgramMatch::new(p, ProgramMatchStage::DepartmentAndLevel)));
            }
        }

        // 2) 仅系部
        if let Some(dept) = department_id {
            if let Some(p) = self.programs.find_program_by_department(dept)? {
                return Ok(Some(ProgramMatch::new(p, ProgramMatchStage::DepartmentOnly)));
            }
        }

        // 3) 专业名为班级名子串（限定同年级）
        if let (Some(classroom_name), Some(level)) = (profile.classroom_name.as_deref(), level_id) {
            if !classroom_name.trim().is_empty() {
                let candidates = self.programs.list_programs_by_level(level)?;
                if let Some(p) = candidates
                    .into_iter()
                    .find(|p| contains_substring(classroom_name, &p.name))
                {
                    return Ok(Some(ProgramMatch::new(p, ProgramMatchStage::ClassroomName)));
                }
            }
        }

        // 4) 仅年级兜底
        if let Some(level) = level_id {
            if let Some(p) = self.programs.find_program_by_level(level)? {
                return Ok(Some(ProgramMatch::new(p, ProgramMatchStage::LevelOnly)));
            }
        }

        Ok(None)
    }
}
