// ==========================================
// 设备维保管理系统 - 分配规则领域模型
// ==========================================
// 对齐: assignment_rule 表
// 用途: AUTO 策略的规则链输入, 按 priority 降序评估
// ==========================================

use crate::domain::types::RuleType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 分配规则实体
///
/// contract_id 为 None 表示全局规则, 适用于所有合同。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRule {
    pub rule_id: String,          // 规则ID (UUID)
    pub contract_id: Option<i64>, // 合同ID (None=全局)
    pub rule_type: RuleType,      // 规则类型
    pub priority: i64,            // 优先级 (越大越先评估)
    pub config: serde_json::Value, // 规则配置 (JSON)
    pub active: bool,             // 启用标记
    pub created_at: String,       // 创建时间
    pub updated_at: String,       // 更新时间
}

impl AssignmentRule {
    /// 创建新的分配规则（自动生成 UUID 和时间戳）
    pub fn new(
        contract_id: Option<i64>,
        rule_type: RuleType,
        priority: i64,
        config: serde_json::Value,
    ) -> Self {
        let now = chrono::Local::now()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();

        Self {
            rule_id: Uuid::new_v4().to_string(),
            contract_id,
            rule_type,
            priority,
            config,
            active: true,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// 是否适用于指定合同
    pub fn applies_to(&self, contract_id: i64) -> bool {
        match self.contract_id {
            Some(id) => id == contract_id,
            None => true,
        }
    }
}
