// ==========================================
// 学籍数据修复引擎 - 配置读取 Trait
// ==========================================
// 职责: 定义引擎所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::department_rule::DepartmentRule;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// ReconcileConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait ReconcileConfigReader: Send + Sync {
    /// 班级人数阈值（超过即为重分配热点）
    ///
    /// # 默认值
    /// - 100
    async fn get_hotspot_threshold(&self) -> RepositoryResult<i64>;

    /// 词元重叠评分最低接受分
    ///
    /// # 默认值
    /// - 2
    async fn get_min_overlap_score(&self) -> RepositoryResult<i32>;

    /// 专业回填进度日志间隔（学生数）
    ///
    /// # 默认值
    /// - 100
    async fn get_progress_interval(&self) -> RepositoryResult<usize>;

    /// 报告中班级人数排行的条数
    ///
    /// # 默认值
    /// - 5
    async fn get_report_top_n(&self) -> RepositoryResult<usize>;

    /// 系部人工规则表（有序）
    ///
    /// # 默认值
    /// - 空表
    async fn get_department_rules(&self) -> RepositoryResult<Vec<DepartmentRule>>;

    /// 是否仅演算不落库
    ///
    /// # 默认值
    /// - false
    async fn get_dry_run(&self) -> RepositoryResult<bool>;
}
