// ==========================================
// 商业表格处理系统 - 工作表规则引擎
// ==========================================
// 职责: 四张工作表的业务规则（标准化、跨表传递、数值派生）
// 顺序: DISTRIBUIDOR → LISTA DE PRECIOS → LISTA DE PRECIOS TRADICIONAL → CLIENTES
// 前置: 网格已经过列结构修复，第 0 行为表头
// ==========================================

mod clientes;
mod distribuidor;
mod lista_precios;
mod lista_tradicional;

pub use lista_precios::price_list_code;

use crate::config::ProcessingConfig;
use crate::domain::grid::{Workbook, WorksheetGrid};
use crate::domain::record::{ColumnSlot, SheetField};
use crate::domain::report::{NumericWarning, ProcessedData};
use crate::domain::types::{CellValue, SheetKind};
use crate::importer::condition_mapper::ConditionCodeMapper;
use crate::importer::error::{PipelineError, PipelineResult};
use crate::importer::header_match::resolve_columns;
use crate::importer::normalizer::{parse_numeric_value, try_parse_numeric};
use tracing::{debug, info};

// ==========================================
// ColumnLayout - 一次解析、逐行复用的列布局
// ==========================================
#[derive(Debug, Clone)]
pub struct ColumnLayout<F: SheetField> {
    pub headers: Vec<String>,
    pub slots: Vec<ColumnSlot<F>>,
    fields: Vec<(F, usize)>,
    /// extra 下标 → 列下标
    extras: Vec<usize>,
}

impl<F: SheetField> ColumnLayout<F> {
    /// 解析必需字段的列索引
    ///
    /// # 规则
    /// 与列存在性检测共用 `resolve_columns`（完全匹配优先、一列只归属一个字段）；
    /// 仍无法解析的字段 → MissingColumn
    pub fn resolve(kind: SheetKind, grid: &WorksheetGrid) -> PipelineResult<Self> {
        let headers = grid.headers();
        let names: Vec<&str> = F::ALL.iter().map(|f| f.column_name()).collect();
        let resolved = resolve_columns(&headers, &names);

        if let Some(pos) = resolved.iter().position(Option::is_none) {
            return Err(PipelineError::MissingColumn {
                sheet: kind.sheet_name().to_string(),
                column: names[pos].to_string(),
            });
        }

        let fields: Vec<(F, usize)> = F::ALL
            .iter()
            .copied()
            .zip(resolved.into_iter().flatten())
            .collect();

        let mut slots = Vec::with_capacity(headers.len());
        let mut extras = Vec::new();
        for col in 0..headers.len() {
            match fields.iter().find(|(_, idx)| *idx == col) {
                Some((field, _)) => slots.push(ColumnSlot::Field(*field)),
                None => {
                    slots.push(ColumnSlot::Extra(extras.len()));
                    extras.push(col);
                }
            }
        }

        debug!(sheet = %kind, columns = headers.len(), extras = extras.len(), "列布局解析完成");

        Ok(Self {
            headers,
            slots,
            fields,
            extras,
        })
    }

    pub fn index_of(&self, field: F) -> Option<usize> {
        self.fields.iter().find(|(f, _)| *f == field).map(|(_, idx)| *idx)
    }

    /// 行中某字段的原始值（缺失单元格 → Empty）
    pub fn cell(&self, row: &[CellValue], field: F) -> CellValue {
        self.index_of(field)
            .and_then(|idx| row.get(idx))
            .cloned()
            .unwrap_or_default()
    }

    /// 非必需列的 (表头, 原始值)，按表头顺序
    pub fn extra_cells<'a>(
        &'a self,
        row: &'a [CellValue],
    ) -> impl Iterator<Item = (&'a str, CellValue)> + 'a {
        self.extras.iter().map(move |col| {
            (
                self.headers[*col].as_str(),
                row.get(*col).cloned().unwrap_or_default(),
            )
        })
    }
}

/// 数据行（跳过完全空白的行）
pub(crate) fn non_blank_rows(grid: &WorksheetGrid) -> impl Iterator<Item = &Vec<CellValue>> {
    grid.data_rows()
        .iter()
        .filter(|row| !row.iter().all(CellValue::is_absent))
}

/// 单元格文本（缺失 → ""），用于拼接
pub(crate) fn cell_text(cell: &CellValue) -> String {
    if cell.is_absent() {
        String::new()
    } else {
        cell.to_string().trim().to_string()
    }
}

// ==========================================
// 数值解析上下文（收集无法解析的告警）
// ==========================================
pub(crate) struct NumericContext<'a> {
    pub sheet: SheetKind,
    pub warnings: &'a mut Vec<NumericWarning>,
}

impl NumericContext<'_> {
    /// 解析数值（同 `parse_numeric_value`）；非占位符文本解析失败时记录告警
    pub fn parse(&mut self, cell: &CellValue, row: usize, column: &str) -> f64 {
        if let CellValue::Text(raw) = cell {
            if !cell.is_placeholder() && try_parse_numeric(raw).is_none() {
                self.warnings.push(NumericWarning {
                    sheet_name: self.sheet.sheet_name().to_string(),
                    row,
                    column: column.to_string(),
                    raw: raw.clone(),
                });
            }
        }
        parse_numeric_value(cell)
    }
}

// ==========================================
// RuleOutput
// ==========================================
#[derive(Debug, Clone)]
pub struct RuleOutput {
    pub data: ProcessedData,
    pub numeric_warnings: Vec<NumericWarning>,
}

// ==========================================
// RuleEngine
// ==========================================
#[derive(Debug, Clone)]
pub struct RuleEngine {
    mapper: ConditionCodeMapper,
    default_iva_rate: f64,
}

impl RuleEngine {
    pub fn new(config: &ProcessingConfig) -> Self {
        Self {
            mapper: ConditionCodeMapper::new(&config.condition_codes),
            default_iva_rate: config.default_iva_rate,
        }
    }

    /// 按固定顺序处理四张工作表
    pub fn apply(&self, workbook: &Workbook) -> PipelineResult<RuleOutput> {
        let sheet = |kind: SheetKind| {
            workbook.sheet(kind.sheet_name()).ok_or_else(|| {
                PipelineError::MissingWorksheets(vec![kind.sheet_name().to_string()])
            })
        };
        let mut warnings = Vec::new();

        let distribuidor = self.transform_distribuidor(sheet(SheetKind::Distribuidor)?)?;
        let lista_precios = self.transform_lista_precios(sheet(SheetKind::ListaPrecios)?)?;
        let lista_precios_tradicional = self.transform_lista_tradicional(
            sheet(SheetKind::ListaPreciosTradicional)?,
            &mut warnings,
        )?;

        let code = price_list_code(&lista_precios);
        let clientes = self.transform_clientes(sheet(SheetKind::Clientes)?, &code)?;

        info!(
            distribuidor = distribuidor.len(),
            lista_precios = lista_precios.len(),
            lista_precios_tradicional = lista_precios_tradicional.len(),
            clientes = clientes.len(),
            numeric_warnings = warnings.len(),
            "业务规则应用完成"
        );

        Ok(RuleOutput {
            data: ProcessedData {
                distribuidor,
                lista_precios,
                lista_precios_tradicional,
                clientes,
            },
            numeric_warnings: warnings,
        })
    }
}
