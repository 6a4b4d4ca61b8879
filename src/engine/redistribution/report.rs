use crate::domain::{ClassroomPopulation, GroupKey, TargetSource};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// GroupOutcome - 单个分组的迁移结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupOutcome {
    pub key: GroupKey,
    pub member_count: usize,
    pub target_classroom_id: String,
    pub target_classroom_name: String,
    pub target_source: TargetSource,
    pub moved: usize,
}

// ==========================================
// RedistributionReport - 重分配报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedistributionReport {
    /// 热点班级（无任何班级时为 None）
    pub hotspot_id: Option<String>,
    pub hotspot_name: Option<String>,

    pub hotspot_size_before: i64,

    /// 分组数
    pub group_count: usize,

    /// 新建班级数
    pub groups_created: usize,

    pub students_moved: usize,

    pub hotspot_size_after: i64,

    /// 热点人数减少量与百分比
    pub reduction: i64,
    pub reduction_pct: f64,

    pub groups: Vec<GroupOutcome>,

    /// 前后班级人数排行（前 N）
    pub top_before: Vec<ClassroomPopulation>,
    pub top_after: Vec<ClassroomPopulation>,

    pub dry_run: bool,
    pub started_at: NaiveDateTime,
    pub finished_at: NaiveDateTime,
}

impl RedistributionReport {
    /// 空操作报告（未超过阈值或没有班级）
    pub(super) fn no_op(
        hotspot: Option<&ClassroomPopulation>,
        top: Vec<ClassroomPopulation>,
        dry_run: bool,
        started_at: NaiveDateTime,
        finished_at: NaiveDateTime,
    ) -> Self {
        let size = hotspot.map_or(0, |h| h.member_count);
        Self {
            hotspot_id: hotspot.map(|h| h.classroom_id.clone()),
            hotspot_name: hotspot.map(|h| h.name.clone()),
            hotspot_size_before: size,
            group_count: 0,
            groups_created: 0,
            students_moved: 0,
            hotspot_size_after: size,
            reduction: 0,
            reduction_pct: 0.0,
            groups: Vec::new(),
            top_before: top.clone(),
            top_after: top,
            dry_run,
            started_at,
            finished_at,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.group_count == 0 && self.students_moved == 0
    }
}

/// 减少百分比（保留两位小数）
pub(super) fn reduction_pct(before: i64, after: i64) -> f64 {
    if before <= 0 {
        return 0.0;
    }
    let pct = (before - after) as f64 / before as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}
