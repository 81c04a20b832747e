// ==========================================
// 设备维保管理系统 - 人员数据仓储
// ==========================================
// 职责: 管理 technician / report_elaborator 表
// 红线: Repository 不含业务逻辑
// 说明: list_active 按ID升序返回, 均衡算法的平局裁决
//       依赖该确定性顺序 (取最小ID)
// ==========================================

use crate::domain::worker::{ReportElaborator, Technician};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// TechnicianRepository - 技术员仓储
// ==========================================

/// 技术员仓储
pub struct TechnicianRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TechnicianRepository {
    /// 创建新的技术员仓储实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询全部在岗技术员 (按ID升序)
    pub fn list_active(&self) -> RepositoryResult<Vec<Technician>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT technician_id, name, active
            FROM technician
            WHERE active = 1
            ORDER BY technician_id
            "#,
        )?;

        let technicians = stmt
            .query_map([], |row| {
                Ok(Technician {
                    technician_id: row.get(0)?,
                    name: row.get(1)?,
                    active: row.get::<_, i64>(2)? != 0,
                })
            })?
            .collect::<SqliteResult<Vec<Technician>>>()?;

        Ok(technicians)
    }

    /// 插入技术员
    pub fn insert(&self, technician: &Technician) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO technician (technician_id, name, active)
            VALUES (?1, ?2, ?3)
            "#,
            params![
                technician.technician_id,
                technician.name,
                technician.active as i64
            ],
        )?;

        Ok(())
    }
}

// ==========================================
// ReportElaboratorRepository - 报告编制员仓储
// ==========================================

/// 报告编制员仓储
pub struct ReportElaboratorRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ReportElaboratorRepository {
    /// 创建新的报告编制员仓储实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询全部在岗报告编制员 (按ID升序)
    pub fn list_active(&self) -> RepositoryResult<Vec<ReportElaborator>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT elaborator_id, name, active, specialization, max_concurrent_reports
            FROM report_elaborator
            WHERE active = 1
            ORDER BY elaborator_id
            "#,
        )?;

        let elaborators = stmt
            .query_map([], |row| {
                Ok(ReportElaborator {
                    elaborator_id: row.get(0)?,
                    name: row.get(1)?,
                    active: row.get::<_, i64>(2)? != 0,
                    specialization: row.get(3)?,
                    max_concurrent_reports: row.get(4)?,
                })
            })?
            .collect::<SqliteResult<Vec<ReportElaborator>>>()?;

        Ok(elaborators)
    }

    /// 插入报告编制员
    pub fn insert(&self, elaborator: &ReportElaborator) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO report_elaborator (
                elaborator_id, name, active, specialization, max_concurrent_reports
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                elaborator.elaborator_id,
                elaborator.name,
                elaborator.active as i64,
                elaborator.specialization,
                elaborator.max_concurrent_reports
            ],
        )?;

        Ok(())
    }
}
