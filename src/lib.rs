// ==========================================
// 设备维保管理系统 - 工单分配引擎核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 维保工单的技术员/报告编制员分配子系统
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

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{RuleType, WorkOrderStatus};

// 领域实体
pub use domain::{
    AssignmentRule, ContractManager, ReportElaborator, Technician, WorkDistribution, WorkOrder,
};

// 引擎
pub use engine::{
    AssignmentResult, DispatchRepositories, DistributionEngine, DistributionStrategy,
};

// 配置
pub use config::{DispatchConfig, LedgerWritePolicy};

// API
pub use api::DistributionApi;

/// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
