// ==========================================
// 商业表格处理系统 - 核心库
// ==========================================
// 职责: 商业工作簿（经销商 / 价格表 / 客户）的列结构修复与数据标准化
// 技术栈: Rust + calamine + rust_xlsxwriter + tokio
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 网格、记录、报告
pub mod domain;

// 配置层 - 必需列清单与处理参数
pub mod config;

// 处理管道层 - 编解码、修复、规则、编排
pub mod importer;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    CellValue, ColumnValidationResult, NumericWarning, OutputFile, ProcessedData,
    ProcessingResult, SheetKind, Workbook, WorksheetGrid, PLACEHOLDER,
};

// 配置
pub use config::{ProcessingConfig, RequiredColumnManifest};

// 处理管道
pub use importer::{
    format_summary, InputFile, PipelineError, PipelineResult, SpreadsheetCodec, WorkbookCodec,
    WorkbookProcessor, WorkbookProcessorImpl,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Procesador de planillas comerciales";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
