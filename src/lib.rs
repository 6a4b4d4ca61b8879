// ==========================================
// 学籍数据修复引擎 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 离线批处理（单线程、顺序执行）
// 职责: 修复缺失的组织外键关联 + 超员班级重分配
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 运行参数与规则表
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    Classroom, ClassroomPopulation, Department, DepartmentMatchStage, GroupKey, Level, Program,
    ProgramMatchStage, Student, StudentProfile, TargetSource,
};

// 引擎
pub use engine::{
    BatchOrchestrator, DepartmentResolver, EngineError, ProgramResolver, ReconcileReport,
    ReconciliationEngine, RedistributionEngine, RedistributionReport, RunMode,
};

// 仓储
pub use repository::{EntityStore, RepositoryError, SqliteEntityStore};

// 配置
pub use config::{ConfigManager, EngineConfig};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "学籍数据修复引擎";
