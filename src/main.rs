// ==========================================
// 设备维保管理系统 - 命令行入口
// ==========================================
// 用途: 运维人员检查分配统计 / 手工触发一次分配
// 传输层 (HTTP/WebSocket) 由外围系统提供, 不在本仓库范围
// ==========================================

use std::sync::{Arc, Mutex};

use anyhow::{bail, Context};

use maintenance_dispatch::config::DispatchConfig;
use maintenance_dispatch::engine::{DispatchRepositories, DistributionEngine};
use maintenance_dispatch::{db, logging, DistributionApi};

const USAGE: &str = r#"用法:
  maintenance-dispatch <db_path> stats [contract_id]
  maintenance-dispatch <db_path> distribute <work_order_id> <contract_id> <supervisor_id> [strategy]

strategy: BALANCED (默认) | AUTO | MANUAL"#;

fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("设备维保管理系统 - 工单分配引擎");
    tracing::info!("系统版本: {}", maintenance_dispatch::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (db_path, command, rest) = match args.as_slice() {
        [db_path, command, rest @ ..] => (db_path.clone(), command.clone(), rest.to_vec()),
        _ => bail!("{}", USAGE),
    };

    let config = DispatchConfig::load_from_file("dispatch_config.json")
        .context("加载配置失败")?;
    tracing::info!("使用数据库: {}", db_path);

    let conn = db::open_sqlite_connection(&db_path).context("打开数据库失败")?;
    db::init_schema(&conn).context("初始化 schema 失败")?;

    let repos = DispatchRepositories::from_connection(Arc::new(Mutex::new(conn)));
    let engine = DistributionEngine::new(repos.clone(), config.ledger_write);
    let api = DistributionApi::new(engine, &repos);

    match command.as_str() {
        "stats" => {
            let contract_id = rest.first().map(|s| s.parse()).transpose()?;
            let stats = api
                .get_distribution_stats(contract_id)
                .map_err(|e| anyhow::anyhow!(e.to_string()))?;

            if stats.is_empty() {
                println!("(无分配记录)");
            }
            for row in stats {
                println!(
                    "contract={} technician={} elaborator={} assigned={} completed={} avg_hours={} last={}",
                    row.contract_id,
                    row.technician_id,
                    row.report_elaborator_id,
                    row.assigned_count,
                    row.completed_count,
                    row.avg_completion_hours
                        .map(|h| format!("{:.1}", h))
                        .unwrap_or_else(|| "-".to_string()),
                    row.last_assignment_at.format("%Y-%m-%d %H:%M:%S"),
                );
            }
        }
        "distribute" => {
            let (work_order_id, contract_id, supervisor_id) = match rest.as_slice() {
                [wo, c, s, ..] => (wo.parse()?, c.parse()?, s.parse()?),
                _ => bail!("{}", USAGE),
            };
            let strategy = rest
                .get(3)
                .cloned()
                .unwrap_or_else(|| config.default_strategy.as_str().to_string());

            let result = api
                .distribute_work_order(work_order_id, contract_id, supervisor_id, &strategy)
                .map_err(|e| anyhow::anyhow!(e.to_string()))?;

            println!("strategy   : {}", result.strategy);
            println!(
                "technician : {}",
                result
                    .technician_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "-".to_string())
            );
            println!(
                "elaborator : {}",
                result
                    .report_elaborator_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "-".to_string())
            );
            println!(
                "manager    : {}",
                result
                    .contract_manager_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "-".to_string())
            );
            println!("reason     : {}", result.reason);
        }
        other => bail!("未知子命令: {}\n{}", other, USAGE),
    }

    Ok(())
}
