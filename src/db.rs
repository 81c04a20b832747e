// ==========================================
// 设备维保管理系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为，避免"部分模块外键开启/部分不开启"
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 提供幂等的建表入口，供二进制入口与测试共用
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化数据库 schema（幂等）
///
/// 分配引擎只依赖以下 6 张表；工单全生命周期的其余表由外围系统维护。
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS technician (
            technician_id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            active INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS report_elaborator (
            elaborator_id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            active INTEGER NOT NULL DEFAULT 1,
            specialization TEXT,
            max_concurrent_reports INTEGER
        );

        CREATE TABLE IF NOT EXISTS contract_manager (
            manager_id INTEGER PRIMARY KEY,
            contract_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            active INTEGER NOT NULL DEFAULT 1
        );
        CREATE INDEX IF NOT EXISTS idx_contract_manager_contract
          ON contract_manager(contract_id, active);

        CREATE TABLE IF NOT EXISTS work_order (
            work_order_id INTEGER PRIMARY KEY,
            contract_id INTEGER NOT NULL,
            technician_id INTEGER,
            report_elaborator_id INTEGER,
            supervisor_id INTEGER,
            status TEXT NOT NULL DEFAULT 'PENDING',
            estimated_hours REAL,
            actual_hours REAL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_work_order_status_tech
          ON work_order(status, technician_id);
        CREATE INDEX IF NOT EXISTS idx_work_order_status_elab
          ON work_order(status, report_elaborator_id);

        CREATE TABLE IF NOT EXISTS assignment_rule (
            rule_id TEXT PRIMARY KEY,
            contract_id INTEGER,
            rule_type TEXT NOT NULL,
            priority INTEGER NOT NULL DEFAULT 0,
            config TEXT NOT NULL DEFAULT '{}',
            active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_assignment_rule_contract
          ON assignment_rule(contract_id, active, priority DESC);

        CREATE TABLE IF NOT EXISTS work_distribution (
            distribution_id INTEGER PRIMARY KEY AUTOINCREMENT,
            contract_id INTEGER NOT NULL,
            technician_id INTEGER NOT NULL,
            report_elaborator_id INTEGER NOT NULL,
            supervisor_id INTEGER,
            assigned_count INTEGER NOT NULL DEFAULT 1,
            completed_count INTEGER NOT NULL DEFAULT 0,
            avg_completion_hours REAL,
            last_assignment_at TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(contract_id, technician_id, report_elaborator_id)
        );
        CREATE INDEX IF NOT EXISTS idx_work_distribution_contract
          ON work_distribution(contract_id);
        "#,
    )?;
    Ok(())
}
