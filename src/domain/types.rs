// ==========================================
// 设备维保管理系统 - 领域类型定义
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 工单状态 (Work Order Status)
// ==========================================
// 负载统计只读 PENDING; 其余状态由外围生命周期维护
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkOrderStatus {
    Pending,   // 待处理
    Scheduled, // 已排期
    Completed, // 已完成
    Overdue,   // 已逾期
}

impl WorkOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkOrderStatus::Pending => "PENDING",
            WorkOrderStatus::Scheduled => "SCHEDULED",
            WorkOrderStatus::Completed => "COMPLETED",
            WorkOrderStatus::Overdue => "OVERDUE",
        }
    }
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WorkOrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" => Ok(WorkOrderStatus::Pending),
            "SCHEDULED" => Ok(WorkOrderStatus::Scheduled),
            "COMPLETED" => Ok(WorkOrderStatus::Completed),
            "OVERDUE" => Ok(WorkOrderStatus::Overdue),
            other => Err(format!("未知工单状态: {}", other)),
        }
    }
}

// ==========================================
// 分配规则类型 (Rule Type)
// ==========================================
// 红线: 封闭枚举, 新增规则类型必须通过穷尽匹配编译检查
// 数据库中出现未知 rule_type 时在仓储层跳过该行
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleType {
    LoadBalance, // 负载均衡规则
    SkillMatch,  // 技能匹配规则
    RegionMatch, // 区域匹配规则
}

impl RuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::LoadBalance => "LOAD_BALANCE",
            RuleType::SkillMatch => "SKILL_MATCH",
            RuleType::RegionMatch => "REGION_MATCH",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RuleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LOAD_BALANCE" => Ok(RuleType::LoadBalance),
            "SKILL_MATCH" => Ok(RuleType::SkillMatch),
            "REGION_MATCH" => Ok(RuleType::RegionMatch),
            other => Err(format!("未知规则类型: {}", other)),
        }
    }
}
