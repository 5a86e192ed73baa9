// ==========================================
// 商业表格处理系统 - LISTA DE PRECIOS TRADICIONAL 规则
// ==========================================
// 规则（逐行独立）:
//   - Precio Sin IVA / % IVA / Precio con IVA 按区域格式解析
//   - % IVA 缺失或为占位符 → 默认税率
//   - 只有含税价 → 反推不含税价；只有不含税价 → 推算含税价
//   - 两者都有 → 均不重算；两者都无 → 均为 0
// ==========================================

use super::{non_blank_rows, ColumnLayout, NumericContext, RuleEngine};
use crate::domain::grid::WorksheetGrid;
use crate::domain::record::{
    ListaTradicionalField as F, ListaTradicionalRecord, ProcessedSheet, SheetField,
};
use crate::domain::report::NumericWarning;
use crate::domain::types::{CellValue, SheetKind};
use crate::importer::error::PipelineResult;
use crate::importer::normalizer::round2;

/// 含税价 → 不含税价
pub fn price_without_iva(price_with_iva: f64, iva_rate: f64) -> f64 {
    round2(price_with_iva / (1.0 + iva_rate / 100.0))
}

/// 不含税价 → 含税价
pub fn price_with_iva(price_without_iva: f64, iva_rate: f64) -> f64 {
    round2(price_without_iva * (1.0 + iva_rate / 100.0))
}

impl RuleEngine {
    pub fn transform_lista_tradicional(
        &self,
        grid: &WorksheetGrid,
        warnings: &mut Vec<NumericWarning>,
    ) -> PipelineResult<ProcessedSheet<ListaTradicionalRecord>> {
        let kind = SheetKind::ListaPreciosTradicional;
        let layout = ColumnLayout::<F>::resolve(kind, grid)?;
        let mut numbers = NumericContext {
            sheet: kind,
            warnings,
        };
        let mut records = Vec::new();

        for (idx, row) in non_blank_rows(grid).enumerate() {
            let row_no = idx + 1;
            let raw_sin = layout.cell(row, F::PrecioSinIva);
            let raw_iva = layout.cell(row, F::PorcentajeIva);
            let raw_con = layout.cell(row, F::PrecioConIva);

            let iva = if raw_iva.is_placeholder() {
                self.default_iva_rate
            } else {
                numbers.parse(&raw_iva, row_no, F::PorcentajeIva.column_name())
            };
            let mut sin = numbers.parse(&raw_sin, row_no, F::PrecioSinIva.column_name());
            let mut con = numbers.parse(&raw_con, row_no, F::PrecioConIva.column_name());

            match (raw_sin.is_placeholder(), raw_con.is_placeholder()) {
                (true, false) => sin = price_without_iva(con, iva),
                (false, true) => con = price_with_iva(sin, iva),
                _ => {}
            }

            records.push(ListaTradicionalRecord {
                codigo_lista: layout.cell(row, F::CodigoLista).or_placeholder(),
                codigo_producto: layout.cell(row, F::CodigoProducto).or_placeholder(),
                nombre_producto: layout.cell(row, F::NombreProducto).or_placeholder(),
                marca: layout.cell(row, F::Marca).or_placeholder(),
                categoria: layout.cell(row, F::Categoria).or_placeholder(),
                precio_sin_iva: CellValue::Number(sin),
                porcentaje_iva: CellValue::Number(iva),
                precio_con_iva: CellValue::Number(con),
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
