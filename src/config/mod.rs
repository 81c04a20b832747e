// ==========================================
// 设备维保管理系统 - 配置层
// ==========================================
// 职责: 分配引擎的运行时配置
// 存储: JSON 文件 (缺省时使用内置默认值)
// ==========================================

use crate::engine::strategy::DistributionStrategy;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ==========================================
// 台账写入策略
// ==========================================
// 分配决策与台账写入是否原子耦合是一个策略选择:
// - BestEffort: 台账写失败只告警, 仍返回已算出的分配结果 (默认)
// - Strict: 台账写失败使整个分配操作失败
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerWritePolicy {
    BestEffort,
    Strict,
}

impl Default for LedgerWritePolicy {
    fn default() -> Self {
        LedgerWritePolicy::BestEffort
    }
}

/// 分配引擎配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// 未指定策略时的默认策略
    pub default_strategy: DistributionStrategy,
    /// 台账写入策略
    pub ledger_write: LedgerWritePolicy,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            default_strategy: DistributionStrategy::Balanced,
            ledger_write: LedgerWritePolicy::BestEffort,
        }
    }
}

impl DispatchConfig {
    /// 从 JSON 文件加载配置
    ///
    /// 文件不存在时返回默认配置; 文件存在但解析失败时返回错误。
    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("解析配置文件失败: {}", path.display()))?;

        Ok(config)
    }
}
