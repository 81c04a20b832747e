// ==========================================
// 设备维保管理系统 - 工单数据仓储
// ==========================================
// 职责: 管理 work_order 表的查询与指派写入
// 红线: Repository 不含业务逻辑
// 说明: 负载统计按需聚合查询, 不维护内存计数器,
//       避免外部状态变更导致的脏缓存
// ==========================================

use crate::domain::types::WorkOrderStatus;
use crate::domain::work_order::WorkOrder;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// 数据库时间戳格式
const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn parse_ts(raw: &str) -> DateTime<Utc> {
    NaiveDateTime::parse_from_str(raw, TS_FORMAT)
        .map(|naive| naive.and_utc())
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// 工单仓储
pub struct WorkOrderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl WorkOrderRepository {
    /// 创建新的工单仓储实例
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

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<WorkOrder> {
        Ok(WorkOrder {
            work_order_id: row.get(0)?,
            contract_id: row.get(1)?,
            technician_id: row.get(2)?,
            report_elaborator_id: row.get(3)?,
            supervisor_id: row.get(4)?,
            status: row
                .get::<_, String>(5)?
                .parse()
                .unwrap_or(WorkOrderStatus::Pending),
            estimated_hours: row.get(6)?,
            actual_hours: row.get(7)?,
            created_at: parse_ts(&row.get::<_, String>(8)?),
            updated_at: parse_ts(&row.get::<_, String>(9)?),
        })
    }

    /// 按ID查询工单
    ///
    /// # 返回
    /// - Ok(Some(WorkOrder)): 找到工单
    /// - Ok(None): 未找到
    /// - Err: 数据库错误
    pub fn find_by_id(&self, work_order_id: i64) -> RepositoryResult<Option<WorkOrder>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT
                work_order_id, contract_id, technician_id, report_elaborator_id,
                supervisor_id, status, estimated_hours, actual_hours,
                created_at, updated_at
            FROM work_order
            WHERE work_order_id = ?1
            "#,
        )?;

        let order = stmt
            .query_row(params![work_order_id], Self::map_row)
            .optional()?;

        Ok(order)
    }

    /// 插入工单
    pub fn insert(&self, order: &WorkOrder) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO work_order (
                work_order_id, contract_id, technician_id, report_elaborator_id,
                supervisor_id, status, estimated_hours, actual_hours,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                order.work_order_id,
                order.contract_id,
                order.technician_id,
                order.report_elaborator_id,
                order.supervisor_id,
                order.status.as_str(),
                order.estimated_hours,
                order.actual_hours,
                order.created_at.format(TS_FORMAT).to_string(),
                order.updated_at.format(TS_FORMAT).to_string(),
            ],
        )?;

        Ok(())
    }

    /// 写入指派结果 (只更新指派字段, 不触碰状态)
    ///
    /// # 返回
    /// - Ok(()): 更新成功
    /// - Err(NotFound): 工单不存在
    pub fn update_assignment(
        &self,
        work_order_id: i64,
        technician_id: Option<i64>,
        report_elaborator_id: Option<i64>,
        supervisor_id: i64,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            r#"
            UPDATE work_order
            SET technician_id = ?2,
                report_elaborator_id = ?3,
                supervisor_id = ?4,
                updated_at = datetime('now')
            WHERE work_order_id = ?1
            "#,
            params![
                work_order_id,
                technician_id,
                report_elaborator_id,
                supervisor_id
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::not_found("work_order", work_order_id));
        }

        Ok(())
    }

    /// 按技术员统计待处理工单数
    ///
    /// 只统计 status=PENDING 且已指派技术员的工单;
    /// 不在返回 Map 中的技术员视为负载 0。
    pub fn count_pending_by_technician(&self) -> RepositoryResult<HashMap<i64, i64>> {
        self.count_pending_grouped("technician_id")
    }

    /// 按报告编制员统计待处理工单数
    pub fn count_pending_by_elaborator(&self) -> RepositoryResult<HashMap<i64, i64>> {
        self.count_pending_grouped("report_elaborator_id")
    }

    fn count_pending_grouped(&self, column: &str) -> RepositoryResult<HashMap<i64, i64>> {
        let conn = self.get_conn()?;

        // column 只取本模块内的两个固定列名, 不接受外部输入
        let sql = format!(
            r#"
            SELECT {col}, COUNT(*)
            FROM work_order
            WHERE status = 'PENDING' AND {col} IS NOT NULL
            GROUP BY {col}
            "#,
            col = column
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut counts = HashMap::new();
        for row in rows {
            let (worker_id, count) = row?;
            counts.insert(worker_id, count);
        }

        Ok(counts)
    }
}
