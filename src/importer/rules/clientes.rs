// ==========================================
// 商业表格处理系统 - CLIENTES 规则
// ==========================================
// 规则（逐行，i 为 0 起的数据行号）:
//   1. Codigo 无条件替换为 i + 1
//   2. Nombre = "<nombre> - <direccion>"，去首尾空白
//   3. Visita 列缺失 → ""（从不填 "SN"）
//   4. Codigo Lista precios 无条件覆盖为价格表代码
//   5. Condicion Iva → 代码
//   6. 其他缺失单元格 → "SN"
// ==========================================

use super::{cell_text, non_blank_rows, ColumnLayout, RuleEngine};
use crate::domain::grid::WorksheetGrid;
use crate::domain::record::{ClientesField as F, ClientesRecord, ProcessedSheet};
use crate::domain::types::{CellValue, SheetKind};
use crate::importer::error::PipelineResult;
use crate::importer::header_match::header_starts_with;

const VISITA_PREFIX: &str = "visita";

/// Visita 列: 缺失 → 空字符串，否则保留原值
fn visita_value(cell: CellValue) -> CellValue {
    if cell.is_absent() {
        CellValue::text("")
    } else {
        cell
    }
}

impl RuleEngine {
    pub fn transform_clientes(
        &self,
        grid: &WorksheetGrid,
        price_list_code: &CellValue,
    ) -> PipelineResult<ProcessedSheet<ClientesRecord>> {
        // Codigo Lista precios 无法解析时在此返回 MissingColumn
        let layout = ColumnLayout::<F>::resolve(SheetKind::Clientes, grid)?;

        let records = non_blank_rows(grid)
            .enumerate()
            .map(|(i, row)| {
                let cell = |field: F| layout.cell(row, field).or_placeholder();
                let nombre = format!(
                    "{} - {}",
                    cell_text(&layout.cell(row, F::Nombre)),
                    cell_text(&layout.cell(row, F::Direccion))
                );

                ClientesRecord {
                    codigo: CellValue::Number((i + 1) as f64),
                    nombre: CellValue::text(nombre.trim()),
                    direccion: cell(F::Direccion),
                    telefono: cell(F::Telefono),
                    email: cell(F::Email),
                    cuit: cell(F::Cuit),
                    condicion_iva: self.mapper.map_cell(cell(F::CondicionIva)),
                    persona_contacto: cell(F::PersonaContacto),
                    codigo_lista_precios: price_list_code.clone(),
                    visitas: F::VISITAS.map(|v| visita_value(layout.cell(row, v))),
                    extra: layout
                        .extra_cells(row)
                        .map(|(header, value)| {
                            if header_starts_with(header, VISITA_PREFIX) {
                                visita_value(value)
                            } else {
                                value.or_placeholder()
                            }
                        })
                        .collect(),
                }
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
    use crate::config::manifest::CLIENTES_COLUMNS;
    use crate::config::ProcessingConfig;
    use crate::domain::record::SheetRecord;

    fn transform(rows: &[&[&str]], code: &str) -> ProcessedSheet<ClientesRecord> {
        let mut all = vec![CLIENTES_COLUMNS];
        all.extend_from_slice(rows);
        let grid = WorksheetGrid::from_text_rows(&all);
        RuleEngine::new(&ProcessingConfig::default())
            .transform_clientes(&grid, &CellValue::text(code))
            .unwrap()
    }

    #[test]
    fn test_codigo_auto_increment() {
        let sheet = transform(
            &[&["99", "Ana"], &["5", "Beto"], &["7", "Carla"]],
            "LP-01",
        );

        let codes: Vec<_> = sheet.records.iter().map(|r| r.codigo.clone()).collect();
        assert_eq!(
            codes,
            vec![
                CellValue::Number(1.0),
                CellValue::Number(2.0),
                CellValue::Number(3.0)
            ]
        );
    }

    #[test]
    fn test_price_list_code_overwrites_original() {
        let mut row = vec![""; CLIENTES_COLUMNS.len()];
        row[8] = "VIEJO";
        let sheet = transform(&[row.as_slice(), &["1", "Beto"]], "LP-01");

        for rec in &sheet.records {
            assert_eq!(rec.codigo_lista_precios, CellValue::text("LP-01"));
        }
    }

    #[test]
    fn test_nombre_joins_direccion() {
        let sheet = transform(
            &[&["1", "Ana", "Calle 1"], &["2", "Beto"], &["3", "", "Calle 3"]],
            "SN",
        );

        assert_eq!(sheet.records[0].nombre, CellValue::text("Ana - Calle 1"));
        assert_eq!(sheet.records[1].nombre, CellValue::text("Beto -"));
        assert_eq!(sheet.records[2].nombre, CellValue::text("- Calle 3"));
        assert_eq!(sheet.records[1].direccion, CellValue::text("SN"));
    }

    #[test]
    fn test_visitas_empty_not_placeholder() {
        let mut row = vec![""; CLIENTES_COLUMNS.len()];
        row[0] = "1";
        row[9] = "X";
        let sheet = transform(&[row.as_slice()], "LP-01");
        let rec = &sheet.records[0];

        assert_eq!(rec.visitas[0], CellValue::text("X"));
        assert_eq!(rec.field(F::VisitaMartes), &CellValue::text(""));
        assert_eq!(rec.telefono, CellValue::text("SN"));
    }

    #[test]
    fn test_condition_mapped() {
        let mut row = vec![""; CLIENTES_COLUMNS.len()];
        row[0] = "1";
        row[6] = "consumidor final";
        let sheet = transform(&[row.as_slice()], "LP-01");

        assert_eq!(sheet.records[0].condicion_iva, CellValue::Number(5.0));
    }

    #[test]
    fn test_extra_visita_column_stays_empty() {
        let mut header: Vec<&str> = CLIENTES_COLUMNS.to_vec();
        header.push("Visita Feriados");
        header.push("Zona");
        let grid = WorksheetGrid::from_text_rows(&[header.as_slice(), &["1", "Ana"]]);

        let sheet = RuleEngine::new(&ProcessingConfig::default())
            .transform_clientes(&grid, &CellValue::placeholder())
            .unwrap();

        assert_eq!(
            sheet.records[0].extra,
            vec![CellValue::text(""), CellValue::text("SN")]
        );
    }
}
