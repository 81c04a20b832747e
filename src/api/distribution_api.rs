// ==========================================
// 设备维保管理系统 - 工单分配 API
// ==========================================
// 职责: 供外围传输层 (HTTP/桌面命令) 调用的分配门面
// 架构: API 层 → 引擎层 → 仓储层
// 说明: 引擎只产出决策, 由本层把指派结果落回工单行
//       ("调用方应用并保存决策")
// ==========================================

use std::sync::Arc;

use tracing::instrument;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::distribution::WorkDistribution;
use crate::engine::distribution::{AssignmentResult, DistributionEngine};
use crate::engine::repositories::DispatchRepositories;
use crate::engine::strategy::DistributionStrategy;
use crate::repository::{WorkDistributionRepository, WorkOrderRepository};

// ==========================================
// DistributionApi - 工单分配 API
// ==========================================

/// 工单分配API
///
/// 职责:
/// 1. 入参校验 (正数ID, 宽松策略解析)
/// 2. 委托 DistributionEngine 产出分配决策
/// 3. 将决策应用到工单行 (指派字段)
/// 4. 分配统计查询与完成回写
pub struct DistributionApi {
    engine: DistributionEngine,
    work_order_repo: Arc<WorkOrderRepository>,
    distribution_repo: Arc<WorkDistributionRepository>,
}

impl DistributionApi {
    /// 创建新的DistributionApi实例
    pub fn new(engine: DistributionEngine, repos: &DispatchRepositories) -> Self {
        Self {
            engine,
            work_order_repo: repos.work_order_repo.clone(),
            distribution_repo: repos.distribution_repo.clone(),
        }
    }

    /// 分配工单并把结果应用到工单行
    ///
    /// # 参数
    /// - work_order_id / contract_id / supervisor_id: 必须为正数
    /// - strategy: 策略字符串, 无法识别时回退 BALANCED
    ///
    /// # 返回
    /// - Ok(AssignmentResult): 分配结果
    /// - Err(ApiError::NotFound): 工单不存在
    #[instrument(skip(self))]
    pub fn distribute_work_order(
        &self,
        work_order_id: i64,
        contract_id: i64,
        supervisor_id: i64,
        strategy: &str,
    ) -> ApiResult<AssignmentResult> {
        if work_order_id <= 0 {
            return Err(ApiError::InvalidInput(format!(
                "工单ID必须为正数: {}",
                work_order_id
            )));
        }
        if contract_id <= 0 {
            return Err(ApiError::InvalidInput(format!(
                "合同ID必须为正数: {}",
                contract_id
            )));
        }
        if supervisor_id <= 0 {
            return Err(ApiError::InvalidInput(format!(
                "主管ID必须为正数: {}",
                supervisor_id
            )));
        }

        let strategy = DistributionStrategy::from_input(strategy);

        let result =
            self.engine
                .distribute_work_order(work_order_id, contract_id, supervisor_id, strategy)?;

        // 把指派结果落回工单行; MANUAL 不产生具体指派, 只盖主管章
        self.work_order_repo.update_assignment(
            work_order_id,
            result.technician_id,
            result.report_elaborator_id,
            supervisor_id,
        )?;

        Ok(result)
    }

    /// 查询分配统计 (管理/报表用)
    ///
    /// # 参数
    /// - contract_id: Some(id) 限定合同; None 返回全部
    pub fn get_distribution_stats(
        &self,
        contract_id: Option<i64>,
    ) -> ApiResult<Vec<WorkDistribution>> {
        if let Some(id) = contract_id {
            if id <= 0 {
                return Err(ApiError::InvalidInput(format!("合同ID必须为正数: {}", id)));
            }
        }

        let stats = self.distribution_repo.list_stats(contract_id)?;
        Ok(stats)
    }

    /// 完成回写: 递增台账完成计数并维护平均完成工时
    pub fn record_completion(
        &self,
        contract_id: i64,
        technician_id: i64,
        report_elaborator_id: i64,
        completion_hours: f64,
    ) -> ApiResult<()> {
        if completion_hours < 0.0 {
            return Err(ApiError::InvalidInput(format!(
                "完成工时不能为负数: {}",
                completion_hours
            )));
        }

        self.distribution_repo.record_completion(
            contract_id,
            technician_id,
            report_elaborator_id,
            completion_hours,
        )?;
        Ok(())
    }
}
