// ==========================================
// 设备维保管理系统 - 分配台账数据仓储
// ==========================================
// 职责: 管理 work_distribution 表
// 并发: record_assignment 使用单条 INSERT .. ON CONFLICT DO UPDATE,
//       并发写同一组合键时最终恰好一行, 计数反映全部递增
//       (不做 read-then-branch)
// ==========================================

use crate::domain::distribution::WorkDistribution;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 分配台账仓储
pub struct WorkDistributionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl WorkDistributionRepository {
    /// 创建新的分配台账仓储实例
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

    fn map_row(row: &Row<'_>) -> rusqlite::Result<WorkDistribution> {
        Ok(WorkDistribution {
            distribution_id: row.get(0)?,
            contract_id: row.get(1)?,
            technician_id: row.get(2)?,
            report_elaborator_id: row.get(3)?,
            supervisor_id: row.get(4)?,
            assigned_count: row.get(5)?,
            completed_count: row.get(6)?,
            avg_completion_hours: row.get(7)?,
            last_assignment_at: NaiveDateTime::parse_from_str(
                &row.get::<_, String>(8)?,
                TS_FORMAT,
            )
            .map(|naive| naive.and_utc())
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        })
    }

    /// 记录一次分配 (插入或递增)
    ///
    /// 首次出现的 (合同,技术员,编制员) 组合插入 assigned_count=1;
    /// 已存在则 assigned_count+1 并刷新主管与时间戳。
    pub fn record_assignment(
        &self,
        contract_id: i64,
        technician_id: i64,
        report_elaborator_id: i64,
        supervisor_id: Option<i64>,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let now = Utc::now().format(TS_FORMAT).to_string();

        conn.execute(
            r#"
            INSERT INTO work_distribution (
                contract_id, technician_id, report_elaborator_id, supervisor_id,
                assigned_count, completed_count, last_assignment_at
            ) VALUES (?1, ?2, ?3, ?4, 1, 0, ?5)
            ON CONFLICT(contract_id, technician_id, report_elaborator_id)
            DO UPDATE SET
                assigned_count = assigned_count + 1,
                supervisor_id = excluded.supervisor_id,
                last_assignment_at = excluded.last_assignment_at
            "#,
            params![
                contract_id,
                technician_id,
                report_elaborator_id,
                supervisor_id,
                now
            ],
        )?;

        Ok(())
    }

    /// 记录一次完成 (递增完成数并维护平均完成工时)
    ///
    /// 平均值按更新前行值计算: (avg*completed + hours) / (completed+1)。
    ///
    /// # 返回
    /// - Ok(()): 更新成功
    /// - Err(NotFound): 组合键无台账行
    pub fn record_completion(
        &self,
        contract_id: i64,
        technician_id: i64,
        report_elaborator_id: i64,
        completion_hours: f64,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            r#"
            UPDATE work_distribution
            SET avg_completion_hours =
                    (COALESCE(avg_completion_hours, 0.0) * completed_count + ?4)
                    / (completed_count + 1),
                completed_count = completed_count + 1
            WHERE contract_id = ?1
              AND technician_id = ?2
              AND report_elaborator_id = ?3
            "#,
            params![
                contract_id,
                technician_id,
                report_elaborator_id,
                completion_hours
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::not_found(
                "work_distribution",
                format!(
                    "contract={} technician={} elaborator={}",
                    contract_id, technician_id, report_elaborator_id
                ),
            ));
        }

        Ok(())
    }

    /// 按组合键查询台账行
    pub fn find_by_key(
        &self,
        contract_id: i64,
        technician_id: i64,
        report_elaborator_id: i64,
    ) -> RepositoryResult<Option<WorkDistribution>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT distribution_id, contract_id, technician_id, report_elaborator_id,
                   supervisor_id, assigned_count, completed_count, avg_completion_hours,
                   last_assignment_at
            FROM work_distribution
            WHERE contract_id = ?1
              AND technician_id = ?2
              AND report_elaborator_id = ?3
            "#,
        )?;

        let distribution = stmt
            .query_row(
                params![contract_id, technician_id, report_elaborator_id],
                Self::map_row,
            )
            .optional()?;

        Ok(distribution)
    }

    /// 查询分配统计 (管理/报表用, 算法内部不读取)
    ///
    /// # 参数
    /// - contract_id: Some(id) 限定合同; None 返回全部
    pub fn list_stats(&self, contract_id: Option<i64>) -> RepositoryResult<Vec<WorkDistribution>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT distribution_id, contract_id, technician_id, report_elaborator_id,
                   supervisor_id, assigned_count, completed_count, avg_completion_hours,
                   last_assignment_at
            FROM work_distribution
            WHERE (?1 IS NULL OR contract_id = ?1)
            ORDER BY assigned_count DESC, contract_id, technician_id
            "#,
        )?;

        let rows = stmt.query_map(params![contract_id], Self::map_row)?;

        let mut stats = Vec::new();
        for row in rows {
            stats.push(row?);
        }

        Ok(stats)
    }

    /// 台账总行数 (测试与诊断用)
    pub fn count_rows(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM work_distribution", [], |row| {
            row.get(0)
        })?;
        Ok(count)
    }
}
