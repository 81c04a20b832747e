// ==========================================
// 设备维保管理系统 - 数据仓储层
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod assignment_rule_repo;
pub mod contract_manager_repo;
pub mod distribution_repo;
pub mod error;
pub mod work_order_repo;
pub mod worker_repo;

// 重导出核心仓储
pub use assignment_rule_repo::AssignmentRuleRepository;
pub use contract_manager_repo::ContractManagerRepository;
pub use distribution_repo::WorkDistributionRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use work_order_repo::WorkOrderRepository;
pub use worker_repo::{ReportElaboratorRepository, TechnicianRepository};
