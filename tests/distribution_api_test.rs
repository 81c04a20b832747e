// ==========================================
// 工单分配 API 测试
// ==========================================
// 职责: 验证入参校验、宽松策略解析、指派结果落回工单行
// ==========================================

#[path = "test_helpers.rs"]
mod test_helpers;

use maintenance_dispatch::api::{ApiError, DistributionApi};
use maintenance_dispatch::config::LedgerWritePolicy;
use maintenance_dispatch::engine::{DistributionEngine, DistributionStrategy};

use crate::test_helpers::*;

fn build_api(db_path: &str) -> DistributionApi {
    let repos = build_repositories(db_path);
    let engine = DistributionEngine::new(repos.clone(), LedgerWritePolicy::BestEffort);
    DistributionApi::new(engine, &repos)
}

#[test]
fn test_distribute_applies_assignment_to_work_order() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let conn = maintenance_dispatch::db::open_sqlite_connection(&db_path).unwrap();

    insert_technician(&conn, 1, "技术员A", true);
    insert_elaborator(&conn, 50, "编制员X", true);
    insert_work_order(&conn, 100, 10, "PENDING", None, None);

    let api = build_api(&db_path);
    let result = api.distribute_work_order(100, 10, 7, "BALANCED").unwrap();
    assert_eq!(result.technician_id, Some(1));

    // 决策由API层落回工单行
    let repos = build_repositories(&db_path);
    let order = repos.work_order_repo.find_by_id(100).unwrap().unwrap();
    assert_eq!(order.technician_id, Some(1));
    assert_eq!(order.report_elaborator_id, Some(50));
    assert_eq!(order.supervisor_id, Some(7));
}

#[test]
fn test_unrecognized_strategy_falls_back_to_balanced() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let conn = maintenance_dispatch::db::open_sqlite_connection(&db_path).unwrap();

    insert_technician(&conn, 1, "技术员A", true);
    insert_elaborator(&conn, 50, "编制员X", true);
    insert_work_order(&conn, 100, 10, "PENDING", None, None);

    let api = build_api(&db_path);
    let result = api
        .distribute_work_order(100, 10, 7, "ROUND_ROBIN")
        .unwrap();

    assert_eq!(result.strategy, DistributionStrategy::Balanced);
    assert_eq!(result.technician_id, Some(1));
}

#[test]
fn test_manual_strategy_stamps_supervisor_only() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let conn = maintenance_dispatch::db::open_sqlite_connection(&db_path).unwrap();

    insert_technician(&conn, 1, "技术员A", true);
    insert_work_order(&conn, 100, 10, "PENDING", None, None);

    let api = build_api(&db_path);
    let result = api.distribute_work_order(100, 10, 7, "MANUAL").unwrap();
    assert_eq!(result.technician_id, None);

    let repos = build_repositories(&db_path);
    let order = repos.work_order_repo.find_by_id(100).unwrap().unwrap();
    assert_eq!(order.technician_id, None);
    assert_eq!(order.supervisor_id, Some(7));
}

#[test]
fn test_input_validation() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let api = build_api(&db_path);

    assert!(matches!(
        api.distribute_work_order(0, 10, 7, "BALANCED"),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        api.distribute_work_order(1, -1, 7, "BALANCED"),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        api.distribute_work_order(1, 10, 0, "BALANCED"),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        api.get_distribution_stats(Some(-5)),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        api.record_completion(10, 1, 5, -1.0),
        Err(ApiError::InvalidInput(_))
    ));
}

#[test]
fn test_unknown_work_order_maps_to_not_found() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let api = build_api(&db_path);

    assert!(matches!(
        api.distribute_work_order(999999, 10, 7, "BALANCED"),
        Err(ApiError::NotFound(_))
    ));
}

#[test]
fn test_stats_and_completion_roundtrip() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let conn = maintenance_dispatch::db::open_sqlite_connection(&db_path).unwrap();

    insert_technician(&conn, 1, "技术员A", true);
    insert_elaborator(&conn, 50, "编制员X", true);
    insert_work_order(&conn, 100, 10, "PENDING", None, None);

    let api = build_api(&db_path);
    api.distribute_work_order(100, 10, 7, "BALANCED").unwrap();
    api.record_completion(10, 1, 50, 3.5).unwrap();

    let stats = api.get_distribution_stats(Some(10)).unwrap();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].assigned_count, 1);
    assert_eq!(stats[0].completed_count, 1);
    assert!((stats[0].avg_completion_hours.unwrap() - 3.5).abs() < 1e-9);
}
