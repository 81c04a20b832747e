// ==========================================
// 设备维保管理系统 - 分配规则数据仓储
// ==========================================
// 职责: 管理 assignment_rule 表
// 说明: rule_type 在领域层是封闭枚举; 库中出现无法解析的
//       rule_type 时跳过该行并告警, 规则链继续评估后续规则
// ==========================================

use crate::domain::rule::AssignmentRule;
use crate::domain::types::RuleType;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// 分配规则仓储
pub struct AssignmentRuleRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AssignmentRuleRepository {
    /// 创建新的分配规则仓储实例
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

    /// 查询合同的启用规则 (按优先级降序)
    ///
    /// 匹配范围: contract_id 精确匹配 或 contract_id IS NULL (全局规则)。
    /// 同优先级按 rule_id 次序稳定返回。
    pub fn list_active_for_contract(
        &self,
        contract_id: i64,
    ) -> RepositoryResult<Vec<AssignmentRule>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT rule_id, contract_id, rule_type, priority, config, active,
                   created_at, updated_at
            FROM assignment_rule
            WHERE active = 1
              AND (contract_id = ?1 OR contract_id IS NULL)
            ORDER BY priority DESC, rule_id
            "#,
        )?;

        let rows = stmt.query_map(params![contract_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<i64>>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, i64>(5)?,
                row.get::<_, String>(6)?,
                row.get::<_, String>(7)?,
            ))
        })?;

        let mut rules = Vec::new();
        for row in rows {
            let (rule_id, contract, rule_type_raw, priority, config_raw, active, created, updated) =
                row?;

            // 未知规则类型: 跳过, 不中断规则链
            let rule_type: RuleType = match rule_type_raw.parse() {
                Ok(t) => t,
                Err(_) => {
                    warn!(rule_id = %rule_id, rule_type = %rule_type_raw, "跳过未知规则类型");
                    continue;
                }
            };

            let config = serde_json::from_str(&config_raw)
                .unwrap_or(serde_json::Value::Object(Default::default()));

            rules.push(AssignmentRule {
                rule_id,
                contract_id: contract,
                rule_type,
                priority,
                config,
                active: active != 0,
                created_at: created,
                updated_at: updated,
            });
        }

        Ok(rules)
    }

    /// 插入分配规则
    pub fn insert(&self, rule: &AssignmentRule) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO assignment_rule (
                rule_id, contract_id, rule_type, priority, config, active,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                rule.rule_id,
                rule.contract_id,
                rule.rule_type.as_str(),
                rule.priority,
                rule.config.to_string(),
                rule.active as i64,
                rule.created_at,
                rule.updated_at
            ],
        )?;

        Ok(())
    }
}
