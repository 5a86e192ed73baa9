// ==========================================
// 商业表格处理系统 - LISTA DE PRECIOS 规则
// ==========================================
// 规则: 直通，缺失单元格 → "SN"
// 跨表: 首条记录的 Codigo 作为 CLIENTES 的 Codigo Lista precios
// ==========================================

use super::{non_blank_rows, ColumnLayout, RuleEngine};
use crate::domain::grid::WorksheetGrid;
use crate::domain::record::{ListaPreciosField as F, ListaPreciosRecord, ProcessedSheet};
use crate::domain::types::{CellValue, SheetKind};
use crate::importer::error::PipelineResult;

/// 价格表代码: 首条记录的 Codigo，无记录时为 "SN"
pub fn price_list_code(sheet: &ProcessedSheet<ListaPreciosRecord>) -> CellValue {
    sheet
        .records
        .first()
        .map(|r| r.codigo.clone())
        .unwrap_or_else(CellValue::placeholder)
}

impl RuleEngine {
    pub fn transform_lista_precios(
        &self,
        grid: &WorksheetGrid,
    ) -> PipelineResult<ProcessedSheet<ListaPreciosRecord>> {
        let layout = ColumnLayout::<F>::resolve(SheetKind::ListaPrecios, grid)?;

        let records = non_blank_rows(grid)
            .map(|row| ListaPreciosRecord {
                codigo: layout.cell(row, F::Codigo).or_placeholder(),
                nombre: layout.cell(row, F::Nombre).or_placeholder(),
                extra: layout
                    .extra_cells(row)
                    .map(|(_, value)| value.or_placeholder())
                    .collect(),
            })
            .collect();

        Ok(ProcessedSheet {
            headers: layout.headers.clone(),
            slots: layout.slots.clone(),
            records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProcessingConfig;

    #[test]
    fn test_pass_through_with_defaults() {
        let grid = WorksheetGrid::from_text_rows(&[
            &["Codigo", "Nombre"],
            &["LP-01", ""],
            &["LP-02", "Minorista"],
        ]);

        let sheet = RuleEngine::new(&ProcessingConfig::default())
            .transform_lista_precios(&grid)
            .unwrap();

        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.records[0].nombre, CellValue::text("SN"));
        assert_eq!(price_list_code(&sheet), CellValue::text("LP-01"));
    }

    #[test]
    fn test_price_list_code_without_records() {
        let grid = WorksheetGrid::from_text_rows(&[&["Codigo", "Nombre"]]);

        let sheet = RuleEngine::new(&ProcessingConfig::default())
            .transform_lista_precios(&grid)
            .unwrap();

        assert!(sheet.is_empty());
        assert_eq!(price_list_code(&sheet), CellValue::text("SN"));
    }
}
