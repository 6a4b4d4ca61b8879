use crate::config::EngineConfig;
use crate::domain::{Classroom, ClassroomPopulation, GroupKey, TargetSource};
use crate::engine::error::EngineResult;
use crate::repository::EntityStore;
use chrono::{NaiveDateTime, Timelike, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::grouping::{group_members, MemberGroup};
use super::naming::build_classroom_name;
use super::report::{reduction_pct, GroupOutcome, RedistributionReport};

// ==========================================
// RedistributionEngine - 班级重分配引擎
// ==========================================
pub struct RedistributionEngine {
    store: Arc<dyn EntityStore>,
    config: EngineConfig,
}

impl RedistributionEngine {
    pub fn new(store: Arc<dyn EntityStore>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// 对当前人数最多的班级执行一次重分配
    ///
    /// # 返回
    /// - Ok(report): 未超过阈值时为空操作报告
    /// - Err(EngineError::Store): 存储不可用（已迁移部分保留）
    pub fn redistribute(&self) -> EngineResult<RedistributionReport> {
        let started_at = Utc::now().naive_utc();
        let top_n = self.config.report_top_n;

        // 1. 识别热点
        let populations = self.store.list_classroom_populations()?;
        let top_before: Vec<ClassroomPopulation> = populations.iter().take(top_n).cloned().collect();

        let hotspot = match populations.first() {
            Some(h) if h.member_count > self.config.hotspot_threshold => h.clone(),
            other => {
                info!(
                    max_population = other.map_or(0, |h| h.member_count),
                    threshold = self.config.hotspot_threshold,
                    "无班级超过人数阈值，跳过重分配"
                );
                return Ok(RedistributionReport::no_op(
                    other,
                    top_before,
                    self.config.dry_run,
                    started_at,
                    Utc::now().naive_utc(),
                ));
            }
        };

        info!(
            hotspot_id = %hotspot.classroom_id,
            hotspot_name = %hotspot.name,
            member_count = hotspot.member_count,
            threshold = self.config.hotspot_threshold,
            dry_run = self.config.dry_run,
            "开始班级重分配"
        );

        // 2. 提取成员 + 3. 分组
        let members = self.store.list_students_in_classroom(&hotspot.classroom_id)?;
        let groups = group_members(&members);

        debug!(
            members = members.len(),
            groups = groups.len(),
            "热点班级成员分组完成"
        );

        // 4. 逐组确定目标 + 5. 迁移
        let mut planned: Vec<Classroom> = Vec::new();
        let mut outcomes = Vec::with_capacity(groups.len());
        let mut groups_created = 0;
        let mut students_moved = 0;

        for group in &groups {
            let (target, source) = self.resolve_target(group, &hotspot, &planned)?;
            if source == TargetSource::Created {
                groups_created += 1;
                if self.config.dry_run {
                    planned.push(target.clone());
                } else {
                    self.store.create_classroom(&target)?;
                }
            }

            let mut moved = 0;
            for student in &group.members {
                if !self.config.dry_run {
                    self.store.update_student_classroom(&student.id, &target.id)?;
                }
                moved += 1;
                students_moved += 1;
            }

            info!(
                group = %group.key,
                target_id = %target.id,
                target_name = %target.name,
                source = %source,
                moved = moved,
                "分组迁移完成"
            );

            outcomes.push(GroupOutcome {
                key: group.key.clone(),
                member_count: group.members.len(),
                target_classroom_id: target.id,
                target_classroom_name: target.name,
                target_source: source,
                moved,
            });
        }

        // 6. 报告
        let size_after = self.store.count_classroom_members(&hotspot.classroom_id)?;
        let top_after: Vec<ClassroomPopulation> = self
            .store
            .list_classroom_populations()?
            .into_iter()
            .take(top_n)
            .collect();

        let report = RedistributionReport {
            hotspot_id: Some(hotspot.classroom_id.clone()),
            hotspot_name: Some(hotspot.name.clone()),
            hotspot_size_before: hotspot.member_count,
            group_count: outcomes.len(),
            groups_created,
            students_moved,
            hotspot_size_after: size_after,
            reduction: hotspot.member_count - size_after,
            reduction_pct: reduction_pct(hotspot.member_count, size_after),
            groups: outcomes,
            top_before,
            top_after,
            dry_run: self.config.dry_run,
            started_at,
            finished_at: Utc::now().naive_utc(),
        };

        info!(
            hotspot_id = %hotspot.classroom_id,
            before = report.hotspot_size_before,
            after = report.hotspot_size_after,
            reduction_pct = report.reduction_pct,
            groups_created = report.groups_created,
            students_moved = report.students_moved,
            "班级重分配完成"
        );

        Ok(report)
    }

    // ==========================================
    // 目标班级解析
    // ==========================================
    /// 先命中者胜出: 完全一致键 -> (系部, 年级) -> 新建
    ///
    /// planned 为 dry-run 下"已规划但未落库"的新班级，排在既有班级之后参与匹配
    fn resolve_target(
        &self,
        group: &MemberGroup<'_>,
        hotspot: &ClassroomPopulation,
        planned: &[Classroom],
    ) -> EngineResult<(Classroom, TargetSource)> {
        let key = &group.key;
        let source_id = hotspot.classroom_id.as_str();

        // a. 完全一致
        let exact = match self.store.find_classroom_by_key(key, source_id)? {
            Some(c) => Some(c),
            None => planned.iter().find(|c| same_key(c, key)).cloned(),
        };
        if let Some(c) = exact {
            return Ok((c, TargetSource::ExactKey));
        }

        // b. 系部 + 年级
        let department_id = key.department_id.as_deref();
        let level_id = key.level_id.as_deref();
        let by_dept_level = match self
            .store
            .find_classroom_by_department_level(department_id, level_id, source_id)?
        {
            Some(c) => Some(c),
            None => planned
                .iter()
                .find(|c| c.department_id == key.department_id && c.level_id == key.level_id)
                .cloned(),
        };
        if let Some(c) = by_dept_level {
            return Ok((c, TargetSource::DepartmentLevel));
        }

        // c. 新建
        let classroom = self.plan_new_classroom(group, hotspot, planned)?;
        Ok((classroom, TargetSource::Created))
    }

    /// 构造新班级（不落库）
    fn plan_new_classroom(
        &self,
        group: &MemberGroup<'_>,
        hotspot: &ClassroomPopulation,
        planned: &[Classroom],
    ) -> EngineResult<Classroom> {
        let key = &group.key;
        let department_id = key.department_id.as_deref();
        let level_id = key.level_id.as_deref();

        // 年级名缺失时以热点班级名为前缀
        let base_name = match level_id {
            Some(id) => self.store.find_level(id)?.map(|l| l.level_name),
            None => None,
        }
        .unwrap_or_else(|| hotspot.name.clone());

        let existing = self.store.count_classrooms_for(level_id, department_id)?
            + planned
                .iter()
                .filter(|c| c.level_id == key.level_id && c.department_id == key.department_id)
                .count() as i64;

        let department_name = match department_id {
            Some(id) => self.store.find_department(id)?.map(|d| d.name),
            None => None,
        };

        let program = match group.representative().and_then(|s| s.program_id.as_deref()) {
            Some(id) => self.store.find_program(id)?,
            None => None,
        };

        let name = build_classroom_name(
            &base_name,
            existing,
            department_name.as_deref(),
            program.as_ref(),
        );

        let classroom = Classroom {
            id: Uuid::new_v4().to_string(),
            name,
            department_id: key.department_id.clone(),
            program_id: key.program_id.clone(),
            level_id: key.level_id.clone(),
            created_at: now_seconds(),
        };

        if program.is_none() && key.program_id.is_some() {
            warn!(group = %key, "组代表专业不存在，班级名不含专业限定语");
        }

        Ok(classroom)
    }
}

fn same_key(classroom: &Classroom, key: &GroupKey) -> bool {
    classroom.program_id == key.program_id
        && classroom.department_id == key.department_id
        && classroom.level_id == key.level_id
}

/// 当前时间（截断到秒，与存储格式一致）
fn now_seconds() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(0).unwrap_or(now)
}
