use crate::config::EngineConfig;
use crate::domain::{Department, Program, ProgramMatchStage, StudentProfile};
use crate::engine::department_resolver::{DepartmentMatch, DepartmentResolver};
use crate::engine::error::EngineResult;
use crate::engine::program_resolver::ProgramResolver;
use crate::repository::{EntityStore, OrgStore};
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::pending::PendingDepartmentView;
use super::report::{DepartmentFix, LinkSummary, ReconcileReport};

/// 学生回填结果（内部汇总）
struct StudentPass {
    resolved: i64,
    stage_counts: BTreeMap<ProgramMatchStage, i64>,
    unresolved_ids: Vec<String>,
}

// ==========================================
// ReconciliationEngine - 关联修复引擎
// ==========================================
// 无持久状态: 每次运行重新读取存储
pub struct ReconciliationEngine {
    store: Arc<dyn EntityStore>,
    config: EngineConfig,
}

impl ReconciliationEngine {
    pub fn new(store: Arc<dyn EntityStore>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// 执行一次完整的关联修复
    ///
    /// # 返回
    /// - Ok(ReconcileReport): 前后统计 + 审计明细
    /// - Err(EngineError::Store): 存储不可用（已写入部分保留）
    pub fn reconcile(&self) -> EngineResult<ReconcileReport> {
        let started_at = Utc::now().naive_utc();

        // 1. 运行前统计（仅用于报告）
        let program_total = self.store.count_programs()?;
        let program_missing = self.store.count_programs_missing_department()?;
        let student_total = self.store.count_students()?;
        let student_missing = self.store.count_students_missing_program()?;

        info!(
            program_total = program_total,
            program_missing = program_missing,
            student_total = student_total,
            student_missing = student_missing,
            dry_run = self.config.dry_run,
            "开始关联修复"
        );

        // 2. 专业 -> 系部
        let (department_fixes, unresolved_program_ids) = self.link_program_departments()?;

        // 3. 学生 -> 专业
        let student_pass = self.link_student_programs(&department_fixes)?;

        // 4. 复查统计
        let program_missing_after = self.store.count_programs_missing_department()?;
        let student_missing_after = self.store.count_students_missing_program()?;

        let report = ReconcileReport {
            programs: LinkSummary::new(
                program_total,
                program_missing,
                program_missing_after,
                department_fixes.len() as i64,
            ),
            students: LinkSummary::new(
                student_total,
                student_missing,
                student_missing_after,
                student_pass.resolved,
            ),
            department_fixes,
            unresolved_program_ids,
            student_stage_counts: student_pass.stage_counts,
            unresolved_student_ids: student_pass.unresolved_ids,
            dry_run: self.config.dry_run,
            started_at,
            finished_at: Utc::now().naive_utc(),
        };

        info!(
            programs_fixed = report.programs.fixed_count,
            programs_missing_after = report.programs.missing_after,
            students_fixed = report.students.fixed_count,
            students_missing_after = report.students.missing_after,
            "关联修复完成"
        );

        Ok(report)
    }

    // ==========================================
    // 专业 -> 系部
    // ==========================================
    /// 两轮解析: 第一轮阶段 1-4；第一轮未命中者进入第二轮（评分 + 多数票）
    ///
    /// 先完成全部解析，再按专业顺序依次写入
    fn link_program_departments(&self) -> EngineResult<(Vec<DepartmentFix>, Vec<String>)> {
        let departments = self.store.list_departments()?;
        let programs = self.store.list_programs_missing_department()?;
        let resolver = DepartmentResolver::from_config(&self.config);

        // 第一轮
        let first_pass: HashMap<&str, DepartmentMatch> = programs
            .iter()
            .filter_map(|p| {
                resolver
                    .resolve_direct(p, &departments)
                    .map(|m| (p.id.as_str(), m))
            })
            .collect();

        debug!(
            candidates = programs.len(),
            first_pass_resolved = first_pass.len(),
            "专业系部第一轮解析完成"
        );

        // 第二轮
        let resolutions = programs
            .iter()
            .map(|program| -> EngineResult<(&Program, Option<DepartmentMatch>)> {
                let resolved = match first_pass.get(program.id.as_str()) {
                    Some(m) => Some(m.clone()),
                    None => self.resolve_second_pass(&resolver, program, &departments)?,
                };
                Ok((program, resolved))
            })
            .collect::<EngineResult<Vec<_>>>()?;

        let mut fixes = Vec::new();
        let mut unresolved = Vec::new();
        for (program, resolved) in resolutions {
            let Some(m) = resolved else {
                warn!(program_id = %program.id, program_name = %program.name, "专业无法匹配系部");
                unresolved.push(program.id.clone());
                continue;
            };

            if !self.config.dry_run {
                self.store
                    .update_program_department(&program.id, &m.department_id)?;
            }

            debug!(
                program_id = %program.id,
                department_id = %m.department_id,
                stage = %m.stage,
                "专业已关联系部"
            );

            fixes.push(DepartmentFix {
                program_id: program.id.clone(),
                program_name: program.name.clone(),
                department_id: m.department_id,
                department_name: m.department_name,
                stage: m.stage,
                score: m.score,
            });
        }

        Ok((fixes, unresolved))
    }

    fn resolve_second_pass(
        &self,
        resolver: &DepartmentResolver,
        program: &Program,
        departments: &[Department],
    ) -> EngineResult<Option<DepartmentMatch>> {
        if let Some(m) = resolver.resolve_by_overlap(program, departments) {
            return Ok(Some(m));
        }
        resolver.resolve_by_students(program, departments, &*self.store)
    }

    // ==========================================
    // 学生 -> 专业
    // ==========================================
    /// dry-run 时专业系部尚未落库，改用叠加了 department_fixes 的视图解析
    fn link_student_programs(&self, department_fixes: &[DepartmentFix]) -> EngineResult<StudentPass> {
        let profiles = self.store.list_students_missing_program()?;

        if self.config.dry_run && !department_fixes.is_empty() {
            let view = PendingDepartmentView::load(&*self.store, department_fixes)?;
            self.resolve_students(&ProgramResolver::new(&view), &profiles)
        } else {
            self.resolve_students(&ProgramResolver::new(&*self.store), &profiles)
        }
    }

    fn resolve_students<S: OrgStore + ?Sized>(
        &self,
        resolver: &ProgramResolver<'_, S>,
        profiles: &[StudentProfile],
    ) -> EngineResult<StudentPass> {
        let interval = self.config.progress_interval.max(1);

        let mut pass = StudentPass {
            resolved: 0,
            stage_counts: BTreeMap::new(),
            unresolved_ids: Vec::new(),
        };

        for (idx, profile) in profiles.iter().enumerate() {
            match resolver.resolve(profile)? {
                Some(m) => {
                    if !self.config.dry_run {
                        self.store
                            .update_student_program(&profile.student.id, &m.program_id)?;
                    }
                    debug!(
                        student_id = %profile.student.id,
                        program_id = %m.program_id,
                        stage = %m.stage,
                        "学生已关联专业"
                    );
                    pass.resolved += 1;
                    *pass.stage_counts.entry(m.stage).or_insert(0) += 1;
                }
                None => {
                    warn!(student_id = %profile.student.id, "学生无法匹配专业");
                    pass.unresolved_ids.push(profile.student.id.clone());
                }
            }

            let processed = idx + 1;
            if processed % interval == 0 {
                info!(
                    processed = processed,
                    total = profiles.len(),
                    resolved = pass.resolved,
                    "学生专业回填进度"
                );
            }
        }

        Ok(pass)
    }
}
