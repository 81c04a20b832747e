// ==========================================
// 设备维保管理系统 - 引擎层仓储聚合
// ==========================================
// 职责: 聚合分配引擎所需的全部 Repository
// 目标: 减少 DistributionEngine 的构造函数参数数量
// ==========================================

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::repository::{
    AssignmentRuleRepository, ContractManagerRepository, ReportElaboratorRepository,
    TechnicianRepository, WorkDistributionRepository, WorkOrderRepository,
};

/// 分配引擎仓储集合
///
/// 将 6 个 Repository 参数合并为 1 个结构体参数, 便于依赖注入与测试。
#[derive(Clone)]
pub struct DispatchRepositories {
    /// 工单仓储
    pub work_order_repo: Arc<WorkOrderRepository>,
    /// 技术员仓储
    pub technician_repo: Arc<TechnicianRepository>,
    /// 报告编制员仓储
    pub elaborator_repo: Arc<ReportElaboratorRepository>,
    /// 合同经理仓储
    pub contract_manager_repo: Arc<ContractManagerRepository>,
    /// 分配规则仓储
    pub rule_repo: Arc<AssignmentRuleRepository>,
    /// 分配台账仓储
    pub distribution_repo: Arc<WorkDistributionRepository>,
}

impl DispatchRepositories {
    /// 创建新的仓储集合
    pub fn new(
        work_order_repo: Arc<WorkOrderRepository>,
        technician_repo: Arc<TechnicianRepository>,
        elaborator_repo: Arc<ReportElaboratorRepository>,
        contract_manager_repo: Arc<ContractManagerRepository>,
        rule_repo: Arc<AssignmentRuleRepository>,
        distribution_repo: Arc<WorkDistributionRepository>,
    ) -> Self {
        Self {
            work_order_repo,
            technician_repo,
            elaborator_repo,
            contract_manager_repo,
            rule_repo,
            distribution_repo,
        }
    }

    /// 基于单个共享连接构建全部仓储
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            work_order_repo: Arc::new(WorkOrderRepository::from_connection(conn.clone())),
            technician_repo: Arc::new(TechnicianRepository::from_connection(conn.clone())),
            elaborator_repo: Arc::new(ReportElaboratorRepository::from_connection(conn.clone())),
            contract_manager_repo: Arc::new(ContractManagerRepository::from_connection(
                conn.clone(),
            )),
            rule_repo: Arc::new(AssignmentRuleRepository::from_connection(conn.clone())),
            distribution_repo: Arc::new(WorkDistributionRepository::from_connection(conn)),
        }
    }
}
