// ==========================================
// 设备维保管理系统 - 工单领域模型
// ==========================================
// 对齐: work_order 表
// 红线: 分配引擎只写 technician/elaborator/supervisor 三个指派字段,
//       状态流转由外围生命周期维护
// ==========================================

use crate::domain::types::WorkOrderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 工单实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrder {
    // ===== 主键 =====
    pub work_order_id: i64, // 工单ID
    pub contract_id: i64,   // 所属合同ID

    // ===== 指派字段 (分配引擎写入) =====
    pub technician_id: Option<i64>,        // 技术员ID
    pub report_elaborator_id: Option<i64>, // 报告编制员ID
    pub supervisor_id: Option<i64>,        // 主管ID

    // ===== 状态与工时 =====
    pub status: WorkOrderStatus,     // 工单状态
    pub estimated_hours: Option<f64>, // 预估工时
    pub actual_hours: Option<f64>,    // 实际工时

    // ===== 时间戳 =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkOrder {
    /// 创建待处理的新工单 (入库前 id 由调用方指定)
    pub fn new_pending(work_order_id: i64, contract_id: i64) -> Self {
        let now = Utc::now();
        Self {
            work_order_id,
            contract_id,
            technician_id: None,
            report_elaborator_id: None,
            supervisor_id: None,
            status: WorkOrderStatus::Pending,
            estimated_hours: None,
            actual_hours: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 是否待处理 (计入负载统计)
    pub fn is_pending(&self) -> bool {
        self.status == WorkOrderStatus::Pending
    }

    /// 是否已指派技术员
    pub fn is_assigned(&self) -> bool {
        self.technician_id.is_some()
    }
}
