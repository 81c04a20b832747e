// ==========================================
// 设备维保管理系统 - 分配台账领域模型
// ==========================================
// 对齐: work_distribution 表
// 不变量: assigned_count 对同一 (合同,技术员,编制员) 组合单调递增,
//         是均衡算法防止单人过载的唯一反馈信号
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 分配台账行
///
/// 每个 (contract_id, technician_id, report_elaborator_id) 组合一行,
/// 首次分配插入 assigned_count=1, 后续分配递增并刷新时间戳。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkDistribution {
    pub distribution_id: i64,      // 自增主键
    pub contract_id: i64,          // 合同ID
    pub technician_id: i64,        // 技术员ID
    pub report_elaborator_id: i64, // 报告编制员ID
    pub supervisor_id: Option<i64>, // 最近一次操作的主管ID

    pub assigned_count: i64,   // 累计分配次数 (单调递增)
    pub completed_count: i64,  // 累计完成次数
    pub avg_completion_hours: Option<f64>, // 平均完成工时

    pub last_assignment_at: DateTime<Utc>, // 最近分配时间
}

impl WorkDistribution {
    /// 完成率 (0.0 - 1.0)
    pub fn completion_ratio(&self) -> f64 {
        if self.assigned_count <= 0 {
            return 0.0;
        }
        self.completed_count as f64 / self.assigned_count as f64
    }
}
