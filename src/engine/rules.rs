// ==========================================
// 设备维保管理系统 - 分配规则评估器
// ==========================================
// 职责: AUTO 策略的规则链评估
// 红线: 规则类型穷尽匹配; 新增类型必须补评估函数才能编译通过
// 说明: 三类评估器当前均为扩展点桩实现, 返回 None 表示
//       "规则未命中", 规则链继续评估后续规则
// ==========================================

use crate::domain::rule::AssignmentRule;
use crate::domain::types::RuleType;
use crate::domain::work_order::WorkOrder;
use crate::repository::error::RepositoryResult;
use tracing::debug;

/// 规则命中时的部分指派结果
///
/// 由命中规则产出, 合并进最终 AssignmentResult。
#[derive(Debug, Clone, Default)]
pub struct PartialAssignment {
    pub technician_id: Option<i64>,
    pub report_elaborator_id: Option<i64>,
}

/// 规则评估器
///
/// 按规则类型分派到对应评估函数; 返回 Ok(None) 表示规则未命中。
pub struct RuleEvaluator;

impl RuleEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// 评估单条规则
    pub fn evaluate(
        &self,
        rule: &AssignmentRule,
        work_order: &WorkOrder,
    ) -> RepositoryResult<Option<PartialAssignment>> {
        match rule.rule_type {
            RuleType::LoadBalance => self.evaluate_load_balance(rule, work_order),
            RuleType::SkillMatch => self.evaluate_skill_match(rule, work_order),
            RuleType::RegionMatch => self.evaluate_region_match(rule, work_order),
        }
    }

    // ==========================================
    // 规则评估扩展点
    // ==========================================
    // 桩实现统一返回 Ok(None) ("未命中", 非错误)

    /// LOAD_BALANCE 规则评估 (扩展点)
    fn evaluate_load_balance(
        &self,
        rule: &AssignmentRule,
        work_order: &WorkOrder,
    ) -> RepositoryResult<Option<PartialAssignment>> {
        debug!(
            rule_id = %rule.rule_id,
            work_order_id = work_order.work_order_id,
            "LOAD_BALANCE 评估器尚未实现, 规则未命中"
        );
        Ok(None)
    }

    /// SKILL_MATCH 规则评估 (扩展点)
    fn evaluate_skill_match(
        &self,
        rule: &AssignmentRule,
        work_order: &WorkOrder,
    ) -> RepositoryResult<Option<PartialAssignment>> {
        debug!(
            rule_id = %rule.rule_id,
            work_order_id = work_order.work_order_id,
            "SKILL_MATCH 评估器尚未实现, 规则未命中"
        );
        Ok(None)
    }

    /// REGION_MATCH 规则评估 (扩展点)
    fn evaluate_region_match(
        &self,
        rule: &AssignmentRule,
        work_order: &WorkOrder,
    ) -> RepositoryResult<Option<PartialAssignment>> {
        debug!(
            rule_id = %rule.rule_id,
            work_order_id = work_order.work_order_id,
            "REGION_MATCH 评估器尚未实现, 规则未命中"
        );
        Ok(None)
    }
}

impl Default for RuleEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stub_evaluators_never_fire() {
        let evaluator = RuleEvaluator::new();
        let order = WorkOrder::new_pending(1, 10);

        for rule_type in [
            RuleType::LoadBalance,
            RuleType::SkillMatch,
            RuleType::RegionMatch,
        ] {
            let rule = AssignmentRule::new(Some(10), rule_type, 5, json!({}));
            let result = evaluator.evaluate(&rule, &order).unwrap();
            assert!(result.is_none(), "{} 桩评估器不应命中", rule_type);
        }
    }
}
