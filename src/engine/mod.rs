// ==========================================
// 设备维保管理系统 - 引擎层
// ==========================================
// 职责: 实现分配业务规则,不拼 SQL
// 红线: Engine 不拼 SQL, 所有规则必须输出 reason
// ==========================================

pub mod distribution;
pub mod repositories;
pub mod rules;
pub mod strategy;

// 重导出核心引擎
pub use distribution::{AssignmentResult, DistributionEngine};
pub use repositories::DispatchRepositories;
pub use rules::{PartialAssignment, RuleEvaluator};
pub use strategy::DistributionStrategy;
