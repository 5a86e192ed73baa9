// ==========================================
// 商业表格处理系统 - 处理管道层
// ==========================================
// 职责: 上传工作簿 → 列结构修复 → 业务规则 → 输出工作簿 + 报告
// 支持: xlsx / xlsm / xls / ods 输入，xlsx 输出
// ==========================================

// 模块声明
pub mod codec;
pub mod column_reconciler;
pub mod condition_mapper;
pub mod error;
pub mod header_match;
pub mod normalizer;
pub mod rules;
pub mod summary;
pub mod workbook_processor_impl;
pub mod workbook_processor_trait;

// 重导出核心类型
pub use codec::SpreadsheetCodec;
pub use column_reconciler::{ColumnReconciler, ReconciliationOutcome};
pub use condition_mapper::{ConditionCodeMapper, ConditionMatch};
pub use error::{PipelineError, PipelineResult};
pub use normalizer::{parse_numeric_value, round2, try_parse_numeric};
pub use rules::{RuleEngine, RuleOutput};
pub use summary::format_summary;
pub use workbook_processor_impl::WorkbookProcessorImpl;

// 重导出 Trait 接口
pub use codec::WorkbookCodec;
pub use workbook_processor_trait::{InputFile, WorkbookProcessor};
