// ==========================================
// 仓储层集成测试
// ==========================================
// 职责: 验证各 Repository 的查询、聚合与台账写入
// ==========================================

#[path = "test_helpers.rs"]
mod test_helpers;

use maintenance_dispatch::domain::types::{RuleType, WorkOrderStatus};
use maintenance_dispatch::domain::{AssignmentRule, WorkOrder};

use crate::test_helpers::*;

// ==========================================
// 工单仓储
// ==========================================

#[test]
fn test_work_order_find_and_insert() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let repos = build_repositories(&db_path);

    assert!(repos.work_order_repo.find_by_id(1).unwrap().is_none());

    let order = WorkOrder::new_pending(1, 10);
    repos.work_order_repo.insert(&order).unwrap();

    let loaded = repos.work_order_repo.find_by_id(1).unwrap().unwrap();
    assert_eq!(loaded.work_order_id, 1);
    assert_eq!(loaded.contract_id, 10);
    assert_eq!(loaded.status, WorkOrderStatus::Pending);
    assert!(loaded.technician_id.is_none());
}

#[test]
fn test_work_order_update_assignment() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let repos = build_repositories(&db_path);

    repos
        .work_order_repo
        .insert(&WorkOrder::new_pending(1, 10))
        .unwrap();

    repos
        .work_order_repo
        .update_assignment(1, Some(3), Some(5), 7)
        .unwrap();

    let loaded = repos.work_order_repo.find_by_id(1).unwrap().unwrap();
    assert_eq!(loaded.technician_id, Some(3));
    assert_eq!(loaded.report_elaborator_id, Some(5));
    assert_eq!(loaded.supervisor_id, Some(7));
    // 指派不触碰状态
    assert_eq!(loaded.status, WorkOrderStatus::Pending);

    // 不存在的工单返回 NotFound
    let err = repos
        .work_order_repo
        .update_assignment(999, None, None, 7)
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_pending_count_grouping() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let conn = maintenance_dispatch::db::open_sqlite_connection(&db_path).unwrap();
    let repos = build_repositories(&db_path);

    // 技术员1: 2条PENDING + 1条COMPLETED (不计) ; 技术员2: 1条PENDING
    insert_work_order(&conn, 1, 10, "PENDING", Some(1), None);
    insert_work_order(&conn, 2, 10, "PENDING", Some(1), Some(5));
    insert_work_order(&conn, 3, 10, "COMPLETED", Some(1), None);
    insert_work_order(&conn, 4, 10, "PENDING", Some(2), None);
    // 未指派的PENDING不进入任何分组
    insert_work_order(&conn, 5, 10, "PENDING", None, None);

    let tech_counts = repos.work_order_repo.count_pending_by_technician().unwrap();
    assert_eq!(tech_counts.get(&1), Some(&2));
    assert_eq!(tech_counts.get(&2), Some(&1));
    assert_eq!(tech_counts.len(), 2);

    let elab_counts = repos.work_order_repo.count_pending_by_elaborator().unwrap();
    assert_eq!(elab_counts.get(&5), Some(&1));
    assert_eq!(elab_counts.len(), 1);
}

// ==========================================
// 人员仓储
// ==========================================

#[test]
fn test_list_active_filters_and_orders() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let conn = maintenance_dispatch::db::open_sqlite_connection(&db_path).unwrap();
    let repos = build_repositories(&db_path);

    insert_technician(&conn, 3, "技术员C", true);
    insert_technician(&conn, 1, "技术员A", true);
    insert_technician(&conn, 2, "离岗技术员", false);
    insert_elaborator(&conn, 20, "编制员B", true);
    insert_elaborator(&conn, 10, "编制员A", false);

    let technicians = repos.technician_repo.list_active().unwrap();
    let ids: Vec<i64> = technicians.iter().map(|t| t.technician_id).collect();
    assert_eq!(ids, vec![1, 3], "过滤离岗并按ID升序");

    let elaborators = repos.elaborator_repo.list_active().unwrap();
    assert_eq!(elaborators.len(), 1);
    assert_eq!(elaborators[0].elaborator_id, 20);
}

#[test]
fn test_contract_manager_lookup() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let conn = maintenance_dispatch::db::open_sqlite_connection(&db_path).unwrap();
    let repos = build_repositories(&db_path);

    insert_contract_manager(&conn, 30, 10, "在任经理", true);
    insert_contract_manager(&conn, 31, 10, "离任经理", false);

    let manager = repos
        .contract_manager_repo
        .find_active_by_contract(10)
        .unwrap()
        .unwrap();
    assert_eq!(manager.manager_id, 30);

    assert!(repos
        .contract_manager_repo
        .find_active_by_contract(99)
        .unwrap()
        .is_none());
}

// ==========================================
// 分配规则仓储
// ==========================================

#[test]
fn test_rule_ordering_and_global_scope() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let repos = build_repositories(&db_path);

    repos
        .rule_repo
        .insert(&AssignmentRule::new(
            Some(10),
            RuleType::SkillMatch,
            5,
            serde_json::json!({}),
        ))
        .unwrap();
    repos
        .rule_repo
        .insert(&AssignmentRule::new(
            None,
            RuleType::LoadBalance,
            20,
            serde_json::json!({}),
        ))
        .unwrap();
    repos
        .rule_repo
        .insert(&AssignmentRule::new(
            Some(11),
            RuleType::RegionMatch,
            50,
            serde_json::json!({}),
        ))
        .unwrap();

    // 停用规则不返回
    let mut inactive = AssignmentRule::new(Some(10), RuleType::RegionMatch, 99, serde_json::json!({}));
    inactive.active = false;
    repos.rule_repo.insert(&inactive).unwrap();

    let rules = repos.rule_repo.list_active_for_contract(10).unwrap();
    let types: Vec<RuleType> = rules.iter().map(|r| r.rule_type).collect();
    // 全局规则适用于合同10; 合同11的规则不适用; 按优先级降序
    assert_eq!(types, vec![RuleType::LoadBalance, RuleType::SkillMatch]);
    assert!(rules[0].contract_id.is_none());
}

#[test]
fn test_rule_unknown_type_skipped_on_load() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let conn = maintenance_dispatch::db::open_sqlite_connection(&db_path).unwrap();
    let repos = build_repositories(&db_path);

    conn.execute(
        r#"
        INSERT INTO assignment_rule (rule_id, contract_id, rule_type, priority, config, active)
        VALUES ('legacy', 10, 'GEO_MATCH', 999, '{}', 1)
        "#,
        [],
    )
    .unwrap();
    repos
        .rule_repo
        .insert(&AssignmentRule::new(
            Some(10),
            RuleType::SkillMatch,
            1,
            serde_json::json!({}),
        ))
        .unwrap();

    let rules = repos.rule_repo.list_active_for_contract(10).unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].rule_type, RuleType::SkillMatch);
}

// ==========================================
// 分配台账仓储
// ==========================================

#[test]
fn test_distribution_upsert_monotonic() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let repos = build_repositories(&db_path);

    repos
        .distribution_repo
        .record_assignment(10, 1, 5, Some(7))
        .unwrap();
    repos
        .distribution_repo
        .record_assignment(10, 1, 5, Some(8))
        .unwrap();
    // 不同组合键另起一行
    repos
        .distribution_repo
        .record_assignment(10, 2, 5, Some(7))
        .unwrap();

    assert_eq!(repos.distribution_repo.count_rows().unwrap(), 2);

    let row = repos.distribution_repo.find_by_key(10, 1, 5).unwrap().unwrap();
    assert_eq!(row.assigned_count, 2);
    assert_eq!(row.completed_count, 0);
    // 主管章刷新为最近一次
    assert_eq!(row.supervisor_id, Some(8));
}

#[test]
fn test_distribution_completion_average() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let repos = build_repositories(&db_path);

    repos
        .distribution_repo
        .record_assignment(10, 1, 5, Some(7))
        .unwrap();
    repos
        .distribution_repo
        .record_assignment(10, 1, 5, Some(7))
        .unwrap();

    repos
        .distribution_repo
        .record_completion(10, 1, 5, 4.0)
        .unwrap();
    repos
        .distribution_repo
        .record_completion(10, 1, 5, 8.0)
        .unwrap();

    let row = repos.distribution_repo.find_by_key(10, 1, 5).unwrap().unwrap();
    assert_eq!(row.completed_count, 2);
    let avg = row.avg_completion_hours.unwrap();
    assert!((avg - 6.0).abs() < 1e-9, "平均完成工时应为6.0, 实际 {}", avg);
    assert!((row.completion_ratio() - 1.0).abs() < 1e-9);

    // 无台账行时完成回写返回 NotFound
    let err = repos
        .distribution_repo
        .record_completion(99, 1, 5, 1.0)
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_distribution_stats_filter() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let repos = build_repositories(&db_path);

    repos
        .distribution_repo
        .record_assignment(10, 1, 5, Some(7))
        .unwrap();
    repos
        .distribution_repo
        .record_assignment(10, 1, 5, Some(7))
        .unwrap();
    repos
        .distribution_repo
        .record_assignment(11, 2, 6, Some(7))
        .unwrap();

    let all = repos.distribution_repo.list_stats(None).unwrap();
    assert_eq!(all.len(), 2);
    // 按 assigned_count 降序
    assert_eq!(all[0].contract_id, 10);
    assert_eq!(all[0].assigned_count, 2);

    let contract_11 = repos.distribution_repo.list_stats(Some(11)).unwrap();
    assert_eq!(contract_11.len(), 1);
    assert_eq!(contract_11[0].technician_id, 2);

    assert!(repos.distribution_repo.list_stats(Some(99)).unwrap().is_empty());
}
