// ==========================================
// 设备维保管理系统 - 人员领域模型
// ==========================================
// 对齐: technician / report_elaborator / contract_manager 表
// 职责: 三类角色独立池, 分配引擎对其只读
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Technician - 技术员
// ==========================================
// 可用性判定: active == true
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technician {
    pub technician_id: i64, // 技术员ID
    pub name: String,       // 姓名
    pub active: bool,       // 在岗标记
}

impl Technician {
    /// 是否可参与分配
    pub fn is_available(&self) -> bool {
        self.active
    }
}

// ==========================================
// ReportElaborator - 报告编制员
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportElaborator {
    pub elaborator_id: i64,                  // 用户ID
    pub name: String,                        // 姓名
    pub active: bool,                        // 在岗标记
    pub specialization: Option<String>,      // 专业方向
    pub max_concurrent_reports: Option<i64>, // 并行报告上限
}

impl ReportElaborator {
    /// 是否可参与分配
    pub fn is_available(&self) -> bool {
        self.active
    }
}

// ==========================================
// ContractManager - 合同经理
// ==========================================
// 约束: 每个合同至多一条 active 记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractManager {
    pub manager_id: i64,  // 经理ID
    pub contract_id: i64, // 合同ID
    pub name: String,     // 姓名
    pub active: bool,     // 在任标记
}
