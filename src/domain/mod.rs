// ==========================================
// 商业表格处理系统 - 领域模型层
// ==========================================
// 职责: 定义网格、记录、报告等值类型
// 红线: 不含文件读写逻辑,不含业务规则
// ==========================================

pub mod grid;
pub mod record;
pub mod report;
pub mod types;

// 重导出核心类型
pub use grid::{Workbook, WorksheetGrid};
pub use record::{
    ClientesField, ClientesRecord, ColumnSlot, DistribuidorField, DistribuidorRecord,
    ListaPreciosField, ListaPreciosRecord, ListaTradicionalField, ListaTradicionalRecord,
    ProcessedSheet, SheetField, SheetRecord,
};
pub use report::{
    ColumnValidationResult, NumericWarning, OutputFile, ProcessedData, ProcessingResult,
};
pub use types::{CellValue, SheetKind, PLACEHOLDER};
