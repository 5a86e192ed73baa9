// ==========================================
// 商业表格处理系统 - DISTRIBUIDOR 规则
// ==========================================
// 规则（逐行）:
//   1. 缺失单元格 → "SN"
//   2. CUIT 为不含数字的非空文本 → 移入 Nombre，CUIT 置 "SN"
//   3. Email 转大写
//   4. Condicion Iva → 代码
// ==========================================

use super::{non_blank_rows, ColumnLayout, RuleEngine};
use crate::domain::grid::WorksheetGrid;
use crate::domain::record::{DistribuidorField as F, DistribuidorRecord, ProcessedSheet};
use crate::domain::types::{CellValue, SheetKind, PLACEHOLDER};
use crate::importer::error::PipelineResult;
use crate::importer::normalizer::uppercase_text;
use tracing::debug;

/// 误填到 CUIT 列的文本（非空、非占位符、不含数字）
fn misplaced_cuit_text(cuit: &CellValue) -> Option<String> {
    let text = cuit.as_text()?.trim();
    if text.is_empty() || text == PLACEHOLDER || text.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(text.to_string())
}

/// Nombre 追加转移文本: "<nombre> - <texto>"，Nombre 为空时只用转移文本
fn append_to_nombre(nombre: &CellValue, captured: &str) -> CellValue {
    if nombre.is_placeholder() {
        CellValue::text(captured)
    } else {
        CellValue::Text(format!("{} - {}", nombre.to_string().trim(), captured))
    }
}

impl RuleEngine {
    pub fn transform_distribuidor(
        &self,
        grid: &WorksheetGrid,
    ) -> PipelineResult<ProcessedSheet<DistribuidorRecord>> {
        let kind = SheetKind::Distribuidor;
        let layout = ColumnLayout::<F>::resolve(kind, grid)?;
        let mut records = Vec::new();

        for (idx, row) in non_blank_rows(grid).enumerate() {
            let cell = |field: F| layout.cell(row, field).or_placeholder();

            let mut cuit = cell(F::Cuit);
            let mut nombre = cell(F::Nombre);

            if let Some(captured) = misplaced_cuit_text(&cuit) {
                debug!(row = idx + 1, cuit = %captured, "CUIT 非数字，转入 Nombre");
                nombre = append_to_nombre(&nombre, &captured);
                cuit = CellValue::placeholder();
            }

            records.push(DistribuidorRecord {
                codigo: cell(F::Codigo),
                nombre,
                cuit,
                telefono: cell(F::Telefono),
                email: uppercase_text(cell(F::Email)),
                condicion_iva: self.mapper.map_cell(cell(F::CondicionIva)),
                persona_contacto: cell(F::PersonaContacto),
                extra: layout
                    .extra_cells(row)
                    .map(|(_, value)| value.or_placeholder())
                    .collect(),
            });
        }

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

    fn engine() -> RuleEngine {
        RuleEngine::new(&ProcessingConfig::default())
    }

    fn grid(rows: &[&[&str]]) -> WorksheetGrid {
        let header: &[&str] = &[
            "Codigo",
            "CUIT",
            "Nombre",
            "Telefono",
            "Email",
            "Condicion Iva",
            "Persona Contacto",
        ];
        let mut all = vec![header];
        all.extend_from_slice(rows);
        WorksheetGrid::from_text_rows(&all)
    }

    #[test]
    fn test_cuit_text_moves_to_nombre() {
        let g = grid(&[&["D1", "ABC", "Juan", "", "", "", ""]]);

        let sheet = engine().transform_distribuidor(&g).unwrap();
        let rec = &sheet.records[0];

        assert_eq!(rec.cuit, CellValue::text("SN"));
        assert_eq!(rec.nombre, CellValue::text("Juan - ABC"));
    }

    #[test]
    fn test_cuit_text_with_empty_nombre() {
        let g = grid(&[&["D1", "Distribuidora Sur", "", "", "", "", ""]]);

        let rec = &engine().transform_distribuidor(&g).unwrap().records[0];

        assert_eq!(rec.nombre, CellValue::text("Distribuidora Sur"));
        assert_eq!(rec.cuit, CellValue::text("SN"));
    }

    #[test]
    fn test_numeric_cuit_kept() {
        let g = grid(&[&["D1", "20-12345678-9", "Juan", "", "", "", ""]]);

        let rec = &engine().transform_distribuidor(&g).unwrap().records[0];

        assert_eq!(rec.cuit, CellValue::text("20-12345678-9"));
        assert_eq!(rec.nombre, CellValue::text("Juan"));
    }

    #[test]
    fn test_defaults_email_and_condition() {
        let g = grid(&[&["D1", "", "Juan", "", "ventas@sur.com", "Responsable Inscripto"]]);

        let rec = &engine().transform_distribuidor(&g).unwrap().records[0];

        assert_eq!(rec.telefono, CellValue::text("SN"));
        assert_eq!(rec.cuit, CellValue::text("SN"));
        assert_eq!(rec.email, CellValue::text("VENTAS@SUR.COM"));
        assert_eq!(rec.condicion_iva, CellValue::Number(1.0));
        // 行尾缺失的单元格
        assert_eq!(rec.persona_contacto, CellValue::text("SN"));
    }

    #[test]
    fn test_extra_columns_preserved_in_order() {
        let g = WorksheetGrid::from_text_rows(&[
            &[
                "Codigo", "Zona", "CUIT", "Nombre", "Telefono", "Email", "Condicion Iva",
                "Persona Contacto",
            ],
            &["D1", "", "30-1", "Juan", "1", "a@b.c", "Exento", "Ana"],
        ]);

        let sheet = engine().transform_distribuidor(&g).unwrap();
        let out = sheet.to_grid();

        assert_eq!(out.headers()[1], "Zona");
        assert_eq!(out.data_rows()[0][1], CellValue::text("SN"));
        assert_eq!(out.data_rows()[0][6], CellValue::Number(4.0));
    }
}
