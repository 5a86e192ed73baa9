// ==========================================
// 商业表格处理系统 - 处理结果与报告模型
// ==========================================
// 职责: 列校验结果、数值解析告警、单文件处理结果
// 用途: 编排层写入，展示层/批处理调用方只读
// ==========================================

use crate::domain::record::{
    ClientesRecord, DistribuidorRecord, ListaPreciosRecord, ListaTradicionalRecord, ProcessedSheet,
};
use crate::domain::types::SheetKind;
use chrono::{DateTime, Utc};
use serde::Serialize;

// ==========================================
// ColumnValidationResult - 列校验结果
// ==========================================
// 每个文件每张必需工作表生成一份，创建后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnValidationResult {
    pub sheet_name: String,
    pub missing_columns: Vec<String>,
    pub added_columns: Vec<String>,
    pub existing_columns: Vec<String>,
}

// ==========================================
// NumericWarning - 数值解析告警
// ==========================================
// 非占位符文本无法解析为数字时记录，值仍按 0 处理
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericWarning {
    pub sheet_name: String,
    /// 数据行号（从 1 开始，不含表头）
    pub row: usize,
    pub column: String,
    pub raw: String,
}

// ==========================================
// ProcessedData - 四类工作表的处理记录
// ==========================================
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedData {
    pub distribuidor: ProcessedSheet<DistribuidorRecord>,
    pub lista_precios: ProcessedSheet<ListaPreciosRecord>,
    pub lista_precios_tradicional: ProcessedSheet<ListaTradicionalRecord>,
    pub clientes: ProcessedSheet<ClientesRecord>,
}

impl ProcessedData {
    pub fn record_count(&self, kind: SheetKind) -> usize {
        match kind {
            SheetKind::Distribuidor => self.distribuidor.len(),
            SheetKind::ListaPrecios => self.lista_precios.len(),
            SheetKind::ListaPreciosTradicional => self.lista_precios_tradicional.len(),
            SheetKind::Clientes => self.clientes.len(),
        }
    }
}

// ==========================================
// OutputFile - 输出工作簿
// ==========================================
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputFile {
    pub file_name: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

// ==========================================
// ProcessingResult - 单文件处理结果
// ==========================================
// 每个输入文件恰好一份，返回后不再修改
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    pub success: bool,
    pub file_name: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_validation: Option<Vec<ColumnValidationResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_data: Option<ProcessedData>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub numeric_warnings: Vec<NumericWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputFile>,
    pub processed_at: DateTime<Utc>,
}

impl ProcessingResult {
    pub fn failure(
        file_name: impl Into<String>,
        message: impl Into<String>,
        errors: Vec<String>,
    ) -> Self {
        Self {
            success: false,
            file_name: file_name.into(),
            message: message.into(),
            errors: if errors.is_empty() { None } else { Some(errors) },
            column_validation: None,
            processed_data: None,
            numeric_warnings: Vec::new(),
            output: None,
            processed_at: Utc::now(),
        }
    }

    /// 某工作表的列校验结果
    pub fn validation_for(&self, kind: SheetKind) -> Option<&ColumnValidationResult> {
        self.column_validation
            .as_ref()?
            .iter()
            .find(|v| v.sheet_name == kind.sheet_name())
    }
}
