// ==========================================
// 学籍数据修复引擎 - 班级重分配引擎
// ==========================================
// 流程: 识别热点班级 -> 提取成员 -> 复合键分组 -> 逐组确定目标班级 -> 迁移
// 红线: 目标班级永远不是热点班级本身
// 红线: 最大班级人数 <= 阈值时不做任何操作
// 红线: 不做补偿回滚；失败后重跑会从热点剩余成员继续
// ==========================================
// 已知缺口: 若新建班级的系部/年级与分组键不一致，重跑可能再建一个近似重复班级
// ==========================================

mod core;
mod grouping;
mod naming;
mod report;

#[cfg(test)]
mod tests;

pub use core::RedistributionEngine;
pub use grouping::{group_members, MemberGroup};
pub use naming::{build_classroom_name, section_label};
pub use report::{GroupOutcome, RedistributionReport};
