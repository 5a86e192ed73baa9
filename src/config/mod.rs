// ==========================================
// 商业表格处理系统 - 配置层
// ==========================================
// 职责: 必需列清单（固定）+ 可调处理参数（JSON）
// ==========================================

pub mod manifest;
pub mod processing_config;

// 重导出
pub use manifest::RequiredColumnManifest;
pub use processing_config::{default_condition_codes, ConditionCodeEntry, ProcessingConfig};
