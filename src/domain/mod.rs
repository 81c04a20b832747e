// ==========================================
// 设备维保管理系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、业务规则接口
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod distribution;
pub mod rule;
pub mod types;
pub mod work_order;
pub mod worker;

// 重导出核心类型
pub use distribution::WorkDistribution;
pub use rule::AssignmentRule;
pub use types::{RuleType, WorkOrderStatus};
pub use work_order::WorkOrder;
pub use worker::{ContractManager, ReportElaborator, Technician};
