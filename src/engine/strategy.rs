// ==========================================
// 设备维保管理系统 - 分配策略定义
// ==========================================
// 用途:
// - Balanced: 最小负载贪心选择 (默认, 保证终止)
// - Auto: 规则链评估, 全部未命中时回退 Balanced
// - Manual: 短路返回空指派, 由人工在外围界面补全
// ==========================================

use serde::{Deserialize, Serialize};
use tracing::warn;

/// 分配策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DistributionStrategy {
    Balanced,
    Auto,
    Manual,
}

impl DistributionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistributionStrategy::Balanced => "BALANCED",
            DistributionStrategy::Auto => "AUTO",
            DistributionStrategy::Manual => "MANUAL",
        }
    }

    /// 宽松解析: 无法识别的策略值回退到 Balanced 并告警
    pub fn from_input(s: &str) -> Self {
        match s.parse() {
            Ok(strategy) => strategy,
            Err(_) => {
                warn!(input = %s, "无法识别的分配策略, 回退到 BALANCED");
                DistributionStrategy::Balanced
            }
        }
    }
}

impl Default for DistributionStrategy {
    fn default() -> Self {
        DistributionStrategy::Balanced
    }
}

impl std::fmt::Display for DistributionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DistributionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BALANCED" => Ok(DistributionStrategy::Balanced),
            "AUTO" => Ok(DistributionStrategy::Auto),
            "MANUAL" => Ok(DistributionStrategy::Manual),
            other => Err(format!("未知策略类型: {}", other)),
        }
    }
}
