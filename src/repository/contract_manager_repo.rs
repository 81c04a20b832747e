// ==========================================
// 设备维保管理系统 - 合同经理数据仓储
// ==========================================
// 职责: 管理 contract_manager 表
// 约束: 每个合同至多一条 active 记录, 查询取 manager_id 最小者兜底
// ==========================================

use crate::domain::worker::ContractManager;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

/// 合同经理仓储
pub struct ContractManagerRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ContractManagerRepository {
    /// 创建新的合同经理仓储实例
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

    /// 查询合同的在任经理
    ///
    /// # 返回
    /// - Ok(Some(ContractManager)): 找到在任经理
    /// - Ok(None): 该合同无在任经理 (合法的退化状态, 非错误)
    pub fn find_active_by_contract(
        &self,
        contract_id: i64,
    ) -> RepositoryResult<Option<ContractManager>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT manager_id, contract_id, name, active
            FROM contract_manager
            WHERE contract_id = ?1 AND active = 1
            ORDER BY manager_id
            LIMIT 1
            "#,
        )?;

        let manager = stmt
            .query_row(params![contract_id], |row| {
                Ok(ContractManager {
                    manager_id: row.get(0)?,
                    contract_id: row.get(1)?,
                    name: row.get(2)?,
                    active: row.get::<_, i64>(3)? != 0,
                })
            })
            .optional()?;

        Ok(manager)
    }

    /// 插入合同经理
    pub fn insert(&self, manager: &ContractManager) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO contract_manager (manager_id, contract_id, name, active)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                manager.manager_id,
                manager.contract_id,
                manager.name,
                manager.active as i64
            ],
        )?;

        Ok(())
    }
}
