// ==========================================
// 学籍数据修复引擎 - 系部解析器
// ==========================================
// 职责: 为缺失 department_id 的专业推断系部
// 优先级: 人工规则 -> 名称子串 -> 描述子串 -> 部分词元
//         -> 词元重叠评分 -> 关联学生多数票
// 红线: 先命中者胜出，后续阶段不再评估
// 红线: 迭代顺序 = 系部插入顺序（平票规则依赖该顺序）
// ==========================================

use crate::config::{DepartmentRule, EngineConfig};
use crate::domain::{Department, DepartmentMatchStage, Program};
use crate::engine::error::EngineResult;
use crate::engine::token_matcher::{contains_substring, token_overlap_score};
use crate::repository::StudentStore;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 部分词元阶段中系部名词元的最短字符数（须 > 2）
const PARTIAL_TOKEN_MIN_CHARS: usize = 3;

/// 系部解析结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentMatch {
    pub department_id: String,
    pub department_name: String,
    pub stage: DepartmentMatchStage,
    /// 仅词元重叠阶段 / 多数票阶段有值（得分 / 票数）
    pub score: Option<i32>,
}

impl DepartmentMatch {
    fn new(department: &Department, stage: DepartmentMatchStage) -> Self {
        Self {
            department_id: department.id.clone(),
            department_name: department.name.clone(),
            stage,
            score: None,
        }
    }

    fn with_score(mut self, score: i32) -> Self {
        self.score = Some(score);
        self
    }
}

// ==========================================
// DepartmentResolver - 系部解析器
// ==========================================
pub struct DepartmentResolver {
    rules: Vec<DepartmentRule>,
    min_overlap_score: i32,
}

impl DepartmentResolver {
    pub fn new(rules: Vec<DepartmentRule>, min_overlap_score: i32) -> Self {
        Self {
            rules,
            min_overlap_score,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.department_rules.clone(), config.min_overlap_score)
    }

    /// 完整解析链（阶段 1-6）
    pub fn resolve<S: StudentStore + ?Sized>(
        &self,
        program: &Program,
        departments: &[Department],
        students: &S,
    ) -> EngineResult<Option<DepartmentMatch>> {
        if let Some(found) = self
            .resolve_direct(program, departments)
            .or_else(|| self.resolve_by_overlap(program, departments))
        {
            return Ok(Some(found));
        }
        self.resolve_by_students(program, departments, students)
    }

    /// 第一轮: 阶段 1-4（纯函数）
    pub fn resolve_direct(
        &self,
        program: &Program,
        departments: &[Department],
    ) -> Option<DepartmentMatch> {
        self.match_manual_rule(program, departments)
            .or_else(|| match_name_substring(program, departments))
            .or_else(|| match_description_substring(program, departments))
            .or_else(|| match_partial_token(program, departments))
    }

    // ==========================================
    // 阶段 1: 人工规则表
    // ==========================================
    fn match_manual_rule(
        &self,
        program: &Program,
        departments: &[Department],
    ) -> Option<DepartmentMatch> {
        self.rules
            .iter()
            .filter(|rule| rule.applies_to(&program.name))
            .find_map(|rule| {
                departments
                    .iter()
                    .find(|d| rule.department.matches(&d.name))
            })
            .map(|d| DepartmentMatch::new(d, DepartmentMatchStage::ManualRule))
    }

    // ==========================================
    // 阶段 5: 词元重叠评分
    // ==========================================
    /// 第二轮兜底: (专业名+描述) 与 (系部名+描述) 的词元重叠评分
    ///
    /// 严格大于才替换当前最优（平票时先到者胜出），最优分 < 下限则失败
    ///
    /// 下限由 EngineConfig::validate 保证不低于 2；此处仍拒绝 0 分
    pub fn resolve_by_overlap(
        &self,
        program: &Program,
        departments: &[Department],
    ) -> Option<DepartmentMatch> {
        let program_text = program.match_text();

        // 初始最优分为 0：零分系部永远不会成为候选
        let mut best: Option<(i32, &Department)> = None;
        for department in departments {
            let score = token_overlap_score(&program_text, &department.match_text());
            if score > best.map_or(0, |(best_score, _)| best_score) {
                best = Some((score, department));
            }
        }

        let (score, department) = best?;
        if score < self.min_overlap_score {
            debug!(
                program_id = %program.id,
                best_department = %department.id,
                score = score,
                min_score = self.min_overlap_score,
                "词元重叠得分不足，放弃"
            );
            return None;
        }

        Some(DepartmentMatch::new(department, DepartmentMatchStage::TokenOverlap).with_score(score))
    }

    // ==========================================
    // 阶段 6: 关联学生多数票
    // ==========================================
    /// 统计已关联该专业的学生的系部，票数最高者胜出
    ///
    /// 平票时按首次出现顺序（先计入者胜出）；不在系部列表中的 id 不计票
    pub fn resolve_by_students<S: StudentStore + ?Sized>(
        &self,
        program: &Program,
        departments: &[Department],
        students: &S,
    ) -> EngineResult<Option<DepartmentMatch>> {
        let linked = students.list_students_by_program(&program.id)?;

        // (department_id, votes)，保持首次出现顺序
        let mut tally: Vec<(&str, i32)> = Vec::new();
        for student in &linked {
            let Some(dept_id) = student.department_id.as_deref() else {
                continue;
            };
            match tally.iter_mut().find(|(id, _)| *id == dept_id) {
                Some((_, votes)) => *votes += 1,
                None => tally.push((dept_id, 1)),
            }
        }

        let mut best: Option<(&str, i32)> = None;
        for (dept_id, votes) in tally {
            if !departments.iter().any(|d| d.id == dept_id) {
                continue;
            }
            if best.map_or(true, |(_, best_votes)| votes > best_votes) {
                best = Some((dept_id, votes));
            }
        }

        Ok(best.and_then(|(dept_id, votes)| {
            departments
                .iter()
                .find(|d| d.id == dept_id)
                .map(|d| DepartmentMatch::new(d, DepartmentMatchStage::StudentMajority).with_score(votes))
        }))
    }
}

// ==========================================
// 阶段 2: 系部名为专业名子串
// ==========================================
fn match_name_substring(program: &Program, departments: &[Department]) -> Option<DepartmentMatch> {
    departments
        .iter()
        .find(|d| contains_substring(&program.name, &d.name))
        .map(|d| DepartmentMatch::new(d, DepartmentMatchStage::NameSubstring))
}

// ==========================================
// 阶段 3: 系部名为专业描述子串
// ==========================================
fn match_description_substring(
    program: &Program,
    departments: &[Department],
) -> Option<DepartmentMatch> {
    let description = program.description.as_deref()?;
    departments
        .iter()
        .find(|d| contains_substring(description, &d.name))
        .map(|d| DepartmentMatch::new(d, DepartmentMatchStage::DescriptionSubstring))
}

// ==========================================
// 阶段 4: 系部名词元为专业名子串
// ==========================================
fn match_partial_token(program: &Program, departments: &[Department]) -> Option<DepartmentMatch> {
    departments
        .iter()
        .find(|d| {
            d.name
                .split_whitespace()
                .filter(|token| token.chars().count() >= PARTIAL_TOKEN_MIN_CHARS)
                .any(|token| contains_substring(&program.name, token))
        })
        .map(|d| DepartmentMatch::new(d, DepartmentMatchStage::PartialToken))
}
