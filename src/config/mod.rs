// ==========================================
// 学籍数据修复引擎 - 配置层
// ==========================================
// 职责: 运行参数与人工规则表管理
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod department_rule;
pub mod engine_config;
pub mod reconcile_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use department_rule::{DepartmentNameMatch, DepartmentRule};
pub use engine_config::EngineConfig;
pub use reconcile_config_trait::ReconcileConfigReader;
