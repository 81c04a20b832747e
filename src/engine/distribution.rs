// ==========================================
// 设备维保管理系统 - 工单分配引擎
// ==========================================
// 职责: 为工单选择技术员与报告编制员, 并记录分配台账
// 输入: 工单ID + 合同ID + 主管ID + 分配策略
// 输出: AssignmentResult (指派结果 + 可追溯 reason)
// 红线: Engine 不拼 SQL, 所有决策必须输出 reason
// 并发: 负载读取与指派写入之间不加锁, 并发调用可能出现
//       瞬时倾斜 (两次调用选中同一人), 属 best-effort 语义
// ==========================================

use std::collections::HashMap;
use std::fmt::Write as _;

use tracing::{debug, info, instrument, warn};

use crate::config::LedgerWritePolicy;
use crate::domain::work_order::WorkOrder;
use crate::engine::repositories::DispatchRepositories;
use crate::engine::rules::{PartialAssignment, RuleEvaluator};
use crate::engine::strategy::DistributionStrategy;
use crate::repository::error::{RepositoryError, RepositoryResult};

// ==========================================
// AssignmentResult - 分配结果
// ==========================================

/// 分配结果
///
/// technician_id / report_elaborator_id 为 None 表示对应池为空
/// 或策略未做选择 (MANUAL); reason 为审计用可读文本, 不做机器解析。
#[derive(Debug, Clone)]
pub struct AssignmentResult {
    pub technician_id: Option<i64>,
    pub report_elaborator_id: Option<i64>,
    pub supervisor_id: i64,
    pub contract_manager_id: Option<i64>,
    pub strategy: DistributionStrategy,
    pub reason: String,
}

// ==========================================
// DistributionEngine - 工单分配引擎
// ==========================================

/// 工单分配引擎
///
/// 每次调用按需重新聚合当前负载, 不维护跨调用状态。
pub struct DistributionEngine {
    repos: DispatchRepositories,
    rule_evaluator: RuleEvaluator,
    ledger_policy: LedgerWritePolicy,
}

impl DistributionEngine {
    /// 创建新的分配引擎
    pub fn new(repos: DispatchRepositories, ledger_policy: LedgerWritePolicy) -> Self {
        Self {
            repos,
            rule_evaluator: RuleEvaluator::new(),
            ledger_policy,
        }
    }

    /// 分配工单
    ///
    /// # 参数
    /// - work_order_id: 工单ID (不存在时返回 NotFound, 无任何副作用)
    /// - contract_id: 合同ID (决定合同经理与规则范围)
    /// - supervisor_id: 发起分配的主管ID (盖章进结果与台账)
    /// - strategy: 分配策略
    ///
    /// # 返回
    /// - Ok(AssignmentResult): 分配结果 (池为空时对应字段为 None)
    /// - Err(NotFound): 工单不存在
    #[instrument(skip(self), fields(strategy = %strategy))]
    pub fn distribute_work_order(
        &self,
        work_order_id: i64,
        contract_id: i64,
        supervisor_id: i64,
        strategy: DistributionStrategy,
    ) -> RepositoryResult<AssignmentResult> {
        // 工单不存在: 快速失败, 不读负载表, 不写台账
        let work_order = self
            .repos
            .work_order_repo
            .find_by_id(work_order_id)?
            .ok_or_else(|| RepositoryError::not_found("work_order", work_order_id))?;

        let result = match strategy {
            DistributionStrategy::Manual => self.distribute_manual(supervisor_id),
            DistributionStrategy::Auto => {
                self.distribute_auto(&work_order, contract_id, supervisor_id)?
            }
            DistributionStrategy::Balanced => {
                self.distribute_balanced(&work_order, contract_id, supervisor_id, false)?
            }
        };

        info!(
            work_order_id,
            contract_id,
            technician_id = ?result.technician_id,
            report_elaborator_id = ?result.report_elaborator_id,
            strategy = %result.strategy,
            reason = %result.reason,
            "工单分配完成"
        );

        Ok(result)
    }

    // ==========================================
    // MANUAL 策略: 短路返回空指派
    // ==========================================

    fn distribute_manual(&self, supervisor_id: i64) -> AssignmentResult {
        AssignmentResult {
            technician_id: None,
            report_elaborator_id: None,
            supervisor_id,
            contract_manager_id: None,
            strategy: DistributionStrategy::Manual,
            reason: format!(
                "DIST_MANUAL: awaiting manual selection by supervisor {}",
                supervisor_id
            ),
        }
    }

    // ==========================================
    // AUTO 策略: 规则链, 未命中回退 BALANCED
    // ==========================================

    fn distribute_auto(
        &self,
        work_order: &WorkOrder,
        contract_id: i64,
        supervisor_id: i64,
    ) -> RepositoryResult<AssignmentResult> {
        let rules = self.repos.rule_repo.list_active_for_contract(contract_id)?;

        for rule in &rules {
            if let Some(partial) = self.rule_evaluator.evaluate(rule, work_order)? {
                return self.build_auto_result(contract_id, supervisor_id, rule, partial);
            }
        }

        // 零条规则或全部未命中: 回退均衡分配, reason 必须明示回退
        debug!(
            contract_id,
            rule_count = rules.len(),
            "AUTO 策略无规则命中, 回退均衡分配"
        );
        self.distribute_balanced(work_order, contract_id, supervisor_id, true)
    }

    fn build_auto_result(
        &self,
        contract_id: i64,
        supervisor_id: i64,
        rule: &crate::domain::rule::AssignmentRule,
        partial: PartialAssignment,
    ) -> RepositoryResult<AssignmentResult> {
        let manager = self
            .repos
            .contract_manager_repo
            .find_active_by_contract(contract_id)?;

        if let (Some(technician_id), Some(elaborator_id)) =
            (partial.technician_id, partial.report_elaborator_id)
        {
            self.write_ledger(contract_id, technician_id, elaborator_id, supervisor_id)?;
        }

        Ok(AssignmentResult {
            technician_id: partial.technician_id,
            report_elaborator_id: partial.report_elaborator_id,
            supervisor_id,
            contract_manager_id: manager.map(|m| m.manager_id),
            strategy: DistributionStrategy::Auto,
            reason: format!(
                "DIST_AUTO: rule={} type={} priority={}",
                rule.rule_id, rule.rule_type, rule.priority
            ),
        })
    }

    // ==========================================
    // BALANCED 策略: 最小负载贪心选择
    // ==========================================

    /// 均衡分配
    ///
    /// 技术员与编制员独立选择 (无联合优化); 负载 = 按人分组的
    /// PENDING 工单数, 不在分组里的人视为负载 0; 平局取池序
    /// 首个 (池按ID升序, 即最小ID)。
    fn distribute_balanced(
        &self,
        _work_order: &WorkOrder,
        contract_id: i64,
        supervisor_id: i64,
        auto_fallback: bool,
    ) -> RepositoryResult<AssignmentResult> {
        // 池为全系统在岗人员, 不按合同过滤 (沿用现行设计, 见 DESIGN.md)
        let technicians = self.repos.technician_repo.list_active()?;
        let tech_load = self.repos.work_order_repo.count_pending_by_technician()?;
        let tech_pick = Self::select_least_loaded(
            technicians
                .iter()
                .map(|t| (t.technician_id, t.name.as_str())),
            &tech_load,
        );

        let elaborators = self.repos.elaborator_repo.list_active()?;
        let elab_load = self.repos.work_order_repo.count_pending_by_elaborator()?;
        let elab_pick = Self::select_least_loaded(
            elaborators
                .iter()
                .map(|e| (e.elaborator_id, e.name.as_str())),
            &elab_load,
        );

        let manager = self
            .repos
            .contract_manager_repo
            .find_active_by_contract(contract_id)?;

        // 台账只在技术员与编制员都有具体选择时落一行
        if let (Some((technician_id, _, _)), Some((elaborator_id, _, _))) =
            (&tech_pick, &elab_pick)
        {
            self.write_ledger(contract_id, *technician_id, *elaborator_id, supervisor_id)?;
        }

        let reason = Self::balanced_reason(&tech_pick, &elab_pick, auto_fallback);

        Ok(AssignmentResult {
            technician_id: tech_pick.map(|(id, _, _)| id),
            report_elaborator_id: elab_pick.map(|(id, _, _)| id),
            supervisor_id,
            contract_manager_id: manager.map(|m| m.manager_id),
            strategy: DistributionStrategy::Balanced,
            reason,
        })
    }

    /// 最小负载选择
    ///
    /// 返回 (人员ID, 姓名, 选择前负载); 候选为空返回 None。
    /// 仅在严格更小时替换, 保证平局取先遍历到的候选。
    fn select_least_loaded<'a>(
        candidates: impl Iterator<Item = (i64, &'a str)>,
        load: &HashMap<i64, i64>,
    ) -> Option<(i64, String, i64)> {
        let mut best: Option<(i64, String, i64)> = None;

        for (worker_id, name) in candidates {
            let count = *load.get(&worker_id).unwrap_or(&0);
            let replace = match &best {
                Some((_, _, best_count)) => count < *best_count,
                None => true,
            };
            if replace {
                best = Some((worker_id, name.to_string(), count));
            }
        }

        best
    }

    /// 构造均衡分配的 reason (命名选中人员与其分配前负载)
    fn balanced_reason(
        tech_pick: &Option<(i64, String, i64)>,
        elab_pick: &Option<(i64, String, i64)>,
        auto_fallback: bool,
    ) -> String {
        let mut reason = String::new();
        if auto_fallback {
            reason.push_str("DIST_AUTO_FALLBACK: no active rule produced an assignment; ");
        }
        reason.push_str("DIST_BALANCED: ");

        match tech_pick {
            Some((id, name, pending)) => {
                let _ = write!(reason, "technician={} ({}, pending={})", id, name, pending);
            }
            None => reason.push_str("technician=none (no active technicians)"),
        }
        reason.push_str(", ");
        match elab_pick {
            Some((id, name, pending)) => {
                let _ = write!(reason, "elaborator={} ({}, pending={})", id, name, pending);
            }
            None => reason.push_str("elaborator=none (no active elaborators)"),
        }

        reason
    }

    // ==========================================
    // 台账写入 (策略可配)
    // ==========================================

    /// 写分配台账
    ///
    /// BestEffort: 写失败只告警, 分配结果照常返回;
    /// Strict: 写失败使整个分配操作失败。
    fn write_ledger(
        &self,
        contract_id: i64,
        technician_id: i64,
        elaborator_id: i64,
        supervisor_id: i64,
    ) -> RepositoryResult<()> {
        match self.repos.distribution_repo.record_assignment(
            contract_id,
            technician_id,
            elaborator_id,
            Some(supervisor_id),
        ) {
            Ok(()) => Ok(()),
            Err(err) => match self.ledger_policy {
                LedgerWritePolicy::Strict => Err(err),
                LedgerWritePolicy::BestEffort => {
                    warn!(
                        contract_id,
                        technician_id,
                        elaborator_id,
                        error = %err,
                        "分配台账写入失败, 按 best-effort 策略继续返回分配结果"
                    );
                    Ok(())
                }
            },
        }
    }
}
