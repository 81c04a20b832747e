// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、测试数据生成等功能
// ==========================================

#![allow(dead_code)]

use std::error::Error;
use std::sync::{Arc, Mutex};

use maintenance_dispatch::db;
use maintenance_dispatch::engine::DispatchRepositories;
use rusqlite::{params, Connection};
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = db::open_sqlite_connection(&db_path)?;
    db::init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 打开应用统一 PRAGMA 的测试连接
pub fn open_test_connection(db_path: &str) -> rusqlite::Result<Arc<Mutex<Connection>>> {
    let conn = db::open_sqlite_connection(db_path)?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// 基于共享连接构建全部仓储
pub fn build_repositories(db_path: &str) -> DispatchRepositories {
    let conn = open_test_connection(db_path).expect("打开测试连接失败");
    DispatchRepositories::from_connection(conn)
}

// ==========================================
// 测试数据生成
// ==========================================

/// 插入技术员
pub fn insert_technician(conn: &Connection, technician_id: i64, name: &str, active: bool) {
    conn.execute(
        "INSERT INTO technician (technician_id, name, active) VALUES (?1, ?2, ?3)",
        params![technician_id, name, active as i64],
    )
    .expect("插入技术员失败");
}

/// 插入报告编制员
pub fn insert_elaborator(conn: &Connection, elaborator_id: i64, name: &str, active: bool) {
    conn.execute(
        r#"
        INSERT INTO report_elaborator (elaborator_id, name, active, specialization, max_concurrent_reports)
        VALUES (?1, ?2, ?3, NULL, NULL)
        "#,
        params![elaborator_id, name, active as i64],
    )
    .expect("插入报告编制员失败");
}

/// 插入合同经理
pub fn insert_contract_manager(
    conn: &Connection,
    manager_id: i64,
    contract_id: i64,
    name: &str,
    active: bool,
) {
    conn.execute(
        r#"
        INSERT INTO contract_manager (manager_id, contract_id, name, active)
        VALUES (?1, ?2, ?3, ?4)
        "#,
        params![manager_id, contract_id, name, active as i64],
    )
    .expect("插入合同经理失败");
}

/// 插入工单
pub fn insert_work_order(
    conn: &Connection,
    work_order_id: i64,
    contract_id: i64,
    status: &str,
    technician_id: Option<i64>,
    elaborator_id: Option<i64>,
) {
    conn.execute(
        r#"
        INSERT INTO work_order (
            work_order_id, contract_id, technician_id, report_elaborator_id,
            supervisor_id, status
        ) VALUES (?1, ?2, ?3, ?4, NULL, ?5)
        "#,
        params![work_order_id, contract_id, technician_id, elaborator_id, status],
    )
    .expect("插入工单失败");
}

/// 为技术员补挂指定数量的 PENDING 工单 (制造负载)
///
/// work_order_id 从 base_id 起连续分配
pub fn seed_pending_load_for_technician(
    conn: &Connection,
    technician_id: i64,
    contract_id: i64,
    count: i64,
    base_id: i64,
) {
    for i in 0..count {
        insert_work_order(
            conn,
            base_id + i,
            contract_id,
            "PENDING",
            Some(technician_id),
            None,
        );
    }
}

/// 为报告编制员补挂指定数量的 PENDING 工单 (制造负载)
pub fn seed_pending_load_for_elaborator(
    conn: &Connection,
    elaborator_id: i64,
    contract_id: i64,
    count: i64,
    base_id: i64,
) {
    for i in 0..count {
        insert_work_order(
            conn,
            base_id + i,
            contract_id,
            "PENDING",
            None,
            Some(elaborator_id),
        );
    }
}
