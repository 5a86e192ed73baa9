// ==========================================
// 商业表格处理系统 - 工作簿处理器实现
// ==========================================
// 职责: 串联整个处理管道，从上传字节到结果报告
// 流程: 扩展名 → 解码 → 工作表校验 → 列修复 → 业务规则 → 写出
// ==========================================

use crate::config::{ProcessingConfig, RequiredColumnManifest};
use crate::domain::grid::{Workbook, WorksheetGrid};
use crate::domain::report::{OutputFile, ProcessedData, ProcessingResult};
use crate::domain::types::SheetKind;
use crate::importer::codec::{SpreadsheetCodec, WorkbookCodec};
use crate::importer::column_reconciler::ColumnReconciler;
use crate::importer::error::{PipelineError, PipelineResult};
use crate::importer::rules::RuleEngine;
use crate::importer::workbook_processor_trait::{InputFile, WorkbookProcessor};
use async_trait::async_trait;
use chrono::Utc;
use std::path::Path;
use tracing::{debug, error, info, instrument, warn, Span};
use uuid::Uuid;

const SUCCESS_MESSAGE: &str = "Archivo procesado correctamente";

// ==========================================
// WorkbookProcessorImpl
// ==========================================
pub struct WorkbookProcessorImpl {
    codec: Box<dyn WorkbookCodec>,
    config: ProcessingConfig,
    reconciler: ColumnReconciler,
    rules: RuleEngine,
}

impl WorkbookProcessorImpl {
    /// 使用默认编解码器（calamine + rust_xlsxwriter）
    pub fn new(config: ProcessingConfig) -> Self {
        Self::with_codec(config, Box::new(SpreadsheetCodec::new()))
    }

    pub fn with_codec(config: ProcessingConfig, codec: Box<dyn WorkbookCodec>) -> Self {
        let rules = RuleEngine::new(&config);
        Self {
            codec,
            config,
            reconciler: ColumnReconciler::new(RequiredColumnManifest),
            rules,
        }
    }

    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    /// 输出文件名: <前缀><原文件名去扩展名>.xlsx
    pub fn output_file_name(&self, input_name: &str) -> String {
        let stem = Path::new(input_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(input_name);
        format!("{}{}.xlsx", self.config.output_prefix, stem)
    }

    fn check_extension(&self, file_name: &str) -> PipelineResult<()> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        if self.config.is_supported_extension(ext) {
            Ok(())
        } else {
            Err(PipelineError::UnsupportedFormat(file_name.to_string()))
        }
    }

    /// 缺失的必需工作表（按固定顺序）
    fn missing_sheets(workbook: &Workbook) -> Vec<String> {
        SheetKind::ALL
            .iter()
            .filter(|kind| !workbook.contains(kind.sheet_name()))
            .map(|kind| kind.sheet_name().to_string())
            .collect()
    }

    fn output_sheets(data: &ProcessedData) -> Vec<(String, WorksheetGrid)> {
        vec![
            (
                SheetKind::Distribuidor.sheet_name().to_string(),
                data.distribuidor.to_grid(),
            ),
            (
                SheetKind::ListaPrecios.sheet_name().to_string(),
                data.lista_precios.to_grid(),
            ),
            (
                SheetKind::ListaPreciosTradicional.sheet_name().to_string(),
                data.lista_precios_tradicional.to_grid(),
            ),
            (
                SheetKind::Clientes.sheet_name().to_string(),
                data.clientes.to_grid(),
            ),
        ]
    }

    async fn run_pipeline(&self, input: &InputFile) -> PipelineResult<ProcessingResult> {
        debug!("步骤 1: 扩展名校验");
        self.check_extension(&input.name)?;

        debug!("步骤 2: 解码工作簿");
        let workbook = self.codec.read_workbook(&input.name, &input.bytes).await?;
        debug!(sheets = ?workbook.sheet_names(), "工作簿解码完成");

        debug!("步骤 3: 必需工作表校验");
        let missing = Self::missing_sheets(&workbook);
        if !missing.is_empty() {
            return Err(PipelineError::MissingWorksheets(missing));
        }

        debug!("步骤 4: 列结构修复");
        let reconciled = self.reconciler.reconcile(&workbook)?;
        let added: usize = reconciled
            .validations
            .iter()
            .map(|v| v.added_columns.len())
            .sum();
        info!(added_columns = added, "列结构修复完成");

        debug!("步骤 5: 业务规则");
        let output = self.rules.apply(&reconciled.workbook)?;
        if !output.numeric_warnings.is_empty() {
            warn!(count = output.numeric_warnings.len(), "存在无法解析的数值，已按 0 处理");
        }

        debug!("步骤 6: 写出输出工作簿");
        let bytes = self
            .codec
            .write_workbook(&Self::output_sheets(&output.data))
            .await?;
        let output_file = OutputFile {
            file_name: self.output_file_name(&input.name),
            bytes,
        };
        debug!(file = %output_file.file_name, size = output_file.bytes.len(), "输出工作簿写出完成");

        Ok(ProcessingResult {
            success: true,
            file_name: input.name.clone(),
            message: SUCCESS_MESSAGE.to_string(),
            errors: None,
            column_validation: Some(reconciled.validations),
            processed_data: Some(output.data),
            numeric_warnings: output.numeric_warnings,
            output: Some(output_file),
            processed_at: Utc::now(),
        })
    }
}

#[async_trait]
impl WorkbookProcessor for WorkbookProcessorImpl {
    #[instrument(skip(self, input), fields(file = %input.name))]
    async fn process_file(&self, input: &InputFile) -> ProcessingResult {
        info!("开始处理文件");

        match self.run_pipeline(input).await {
            Ok(result) => {
                info!("文件处理成功");
                result
            }
            Err(e) => {
                error!(error = %e, "文件处理失败");
                ProcessingResult::failure(&input.name, e.summary_message(), e.details())
            }
        }
    }

    #[instrument(skip_all, fields(batch_id, files = inputs.len()))]
    async fn process_files(&self, inputs: &[InputFile]) -> Vec<ProcessingResult> {
        let batch_id = Uuid::new_v4();
        Span::current().record("batch_id", tracing::field::display(batch_id));
        info!("开始批量处理");

        let mut results = Vec::with_capacity(inputs.len());
        for input in inputs {
            results.push(self.process_file(input).await);
        }

        info!(
            success = results.iter().filter(|r| r.success).count(),
            total = results.len(),
            "批量处理完成"
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_name() {
        let processor = WorkbookProcessorImpl::new(ProcessingConfig::default());
        assert_eq!(
            processor.output_file_name("ventas marzo.xls"),
            "procesado_ventas marzo.xlsx"
        );
        assert_eq!(processor.output_file_name("datos"), "procesado_datos.xlsx");
    }

    #[test]
    fn test_check_extension() {
        let processor = WorkbookProcessorImpl::new(ProcessingConfig::default());
        assert!(processor.check_extension("a.XLSX").is_ok());
        assert!(processor.check_extension("a.ods").is_ok());
        assert!(matches!(
            processor.check_extension("a.pdf"),
            Err(PipelineError::UnsupportedFormat(_))
        ));
        assert!(processor.check_extension("sin_extension").is_err());
    }

    #[tokio::test]
    async fn test_unsupported_format_result() {
        let processor = WorkbookProcessorImpl::new(ProcessingConfig::default());
        let result = processor
            .process_file(&InputFile::new("notas.txt", b"hola".to_vec()))
            .await;

        assert!(!result.success);
        assert_eq!(result.message, "Formato de archivo no soportado");
        assert!(result.processed_data.is_none());
    }
}
