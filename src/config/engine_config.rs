// ==========================================
// 学籍数据修复引擎 - 引擎运行配置
// ==========================================
// 职责: 汇总一次批处理运行所需的全部参数
// 来源: 默认值 / ReconcileConfigReader（config_kv）
// ==========================================

use crate::config::department_rule::DepartmentRule;
use crate::config::reconcile_config_trait::ReconcileConfigReader;
use crate::engine::error::{EngineError, EngineResult};
use crate::repository::error::RepositoryError;
use serde::{Deserialize, Serialize};

/// 班级人数阈值默认值
pub const DEFAULT_HOTSPOT_THRESHOLD: i64 = 100;

/// 词元重叠评分最低接受分默认值
pub const DEFAULT_MIN_OVERLAP_SCORE: i32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub hotspot_threshold: i64,
    pub min_overlap_score: i32,
    pub progress_interval: usize,
    pub report_top_n: usize,
    pub department_rules: Vec<DepartmentRule>,
    pub dry_run: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hotspot_threshold: DEFAULT_HOTSPOT_THRESHOLD,
            min_overlap_score: DEFAULT_MIN_OVERLAP_SCORE,
            progress_interval: 100,
            report_top_n: 5,
            department_rules: Vec::new(),
            dry_run: false,
        }
    }
}

impl EngineConfig {
    /// 从配置读取器加载（缺失项使用默认值）
    pub async fn load(reader: &dyn ReconcileConfigReader) -> EngineResult<Self> {
        let config = Self {
            hotspot_threshold: reader.get_hotspot_threshold().await?,
            min_overlap_score: reader.get_min_overlap_score().await?,
            progress_interval: reader.get_progress_interval().await?,
            report_top_n: reader.get_report_top_n().await?,
            // 规则表格式错误属于配置问题，而非存储不可用
            department_rules: reader.get_department_rules().await.map_err(|e| match e {
                RepositoryError::FieldValueError { .. } => EngineError::InvalidConfig(e.to_string()),
                other => EngineError::Store(other),
            })?,
            dry_run: reader.get_dry_run().await?,
        };
        config.validate()?;
        Ok(config)
    }

    /// 配置校验
    ///
    /// # 验证规则
    /// 1. progress_interval > 0
    /// 2. report_top_n > 0
    /// 3. hotspot_threshold >= 0
    /// 4. min_overlap_score >= DEFAULT_MIN_OVERLAP_SCORE（下限只能调高）
    /// 5. 规则关键词不能为空
    pub fn validate(&self) -> EngineResult<()> {
        if self.progress_interval == 0 {
            return Err(EngineError::InvalidConfig(
                "progress_interval 必须大于 0".to_string(),
            ));
        }
        if self.report_top_n == 0 {
            return Err(EngineError::InvalidConfig(
                "report_top_n 必须大于 0".to_string(),
            ));
        }
        if self.hotspot_threshold < 0 {
            return Err(EngineError::InvalidConfig(format!(
                "hotspot_threshold 不能为负数: {}",
                self.hotspot_threshold
            )));
        }
        if self.min_overlap_score < DEFAULT_MIN_OVERLAP_SCORE {
            return Err(EngineError::InvalidConfig(format!(
                "min_overlap_score 不能小于 {}: {}",
                DEFAULT_MIN_OVERLAP_SCORE, self.min_overlap_score
            )));
        }
        if let Some(idx) = self
            .department_rules
            .iter()
            .position(|r| r.keyword.trim().is_empty())
        {
            return Err(EngineError::InvalidConfig(format!(
                "department_rules[{}] 关键词为空",
                idx
            )));
        }
        Ok(())
    }

    pub fn with_rules(mut self, rules: Vec<DepartmentRule>) -> Self {
        self.department_rules = rules;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.hotspot_threshold, 100);
        assert_eq!(config.min_overlap_score, 2);
    }

    #[test]
    fn test_validate_rejects_zero_interval_and_blank_keyword() {
        let mut config = EngineConfig::default();
        config.progress_interval = 0;
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));

        let config = EngineConfig::default().with_rules(vec![DepartmentRule::contains(" ", "x")]);
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_overlap_floor_below_two() {
        let mut config = EngineConfig::default();
        config.min_overlap_score = 1;
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));

        config.min_overlap_score = 3;
        assert!(config.validate().is_ok());
    }
}
