// ==========================================
// 设备维保管理系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口, 供外围传输层调用
// ==========================================

pub mod distribution_api;
pub mod error;

// 重导出核心类型
pub use distribution_api::DistributionApi;
pub use error::{ApiError, ApiResult};
