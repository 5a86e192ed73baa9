// ==========================================
// 商业表格处理系统 - 批处理摘要
// ==========================================
// 职责: 将一批 ProcessingResult 折叠为可读文本
// 红线: 输出确定（不含时间戳），相同输入得到相同文本
// ==========================================

use crate::domain::report::ProcessingResult;
use crate::domain::types::SheetKind;
use std::fmt::Write;

const OK_GLYPH: &str = "✅";
const FAIL_GLYPH: &str = "❌";

/// 生成批处理摘要
pub fn format_summary(results: &[ProcessingResult]) -> String {
    let success = results.iter().filter(|r| r.success).count();
    let mut out = String::new();

    let _ = writeln!(out, "=== RESUMEN DE PROCESAMIENTO ===");
    let _ = writeln!(
        out,
        "Archivos procesados con éxito: {}/{}",
        success,
        results.len()
    );

    for result in results {
        write_file_section(&mut out, result);
    }

    out
}

fn write_file_section(out: &mut String, result: &ProcessingResult) {
    let glyph = if result.success { OK_GLYPH } else { FAIL_GLYPH };

    let _ = writeln!(out);
    let _ = writeln!(out, "{} {}", glyph, result.file_name);
    let _ = writeln!(out, "   {}", result.message);

    if let Some(errors) = &result.errors {
        let _ = writeln!(out, "   Errores:");
        for e in errors {
            let _ = writeln!(out, "     - {}", e);
        }
    }

    if let Some(validations) = &result.column_validation {
        let _ = writeln!(out, "   Validación de columnas:");
        for v in validations {
            let _ = writeln!(
                out,
                "     {}: {} existentes, {} agregadas, {} faltantes",
                v.sheet_name,
                v.existing_columns.len(),
                v.added_columns.len(),
                v.missing_columns.len()
            );
        }
    }

    if let Some(data) = &result.processed_data {
        let _ = writeln!(out, "   Registros procesados:");
        for kind in SheetKind::ALL {
            let _ = writeln!(out, "     {}: {}", kind.sheet_name(), data.record_count(kind));
        }
    }

    if !result.numeric_warnings.is_empty() {
        let _ = writeln!(
            out,
            "   Advertencias numéricas: {} valores no numéricos tratados como 0",
            result.numeric_warnings.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::ColumnValidationResult;

    #[test]
    fn test_summary_failure_lists_errors() {
        let results = vec![ProcessingResult::failure(
            "a.xlsx",
            "El archivo no contiene todas las hojas requeridas",
            vec!["Falta la hoja: CLIENTES".to_string()],
        )];

        let text = format_summary(&results);

        assert!(text.contains("Archivos procesados con éxito: 0/1"));
        assert!(text.contains("❌ a.xlsx"));
        assert!(text.contains("     - Falta la hoja: CLIENTES"));
        assert!(!text.contains("Registros procesados"));
    }

    #[test]
    fn test_summary_validation_counts() {
        let mut result = ProcessingResult::failure("b.xlsx", "x", vec![]);
        result.column_validation = Some(vec![ColumnValidationResult {
            sheet_name: "DISTRIBUIDOR".to_string(),
            missing_columns: vec!["CUIT".to_string()],
            added_columns: vec!["CUIT".to_string()],
            existing_columns: vec!["Codigo".to_string(), "Nombre".to_string()],
        }]);

        let text = format_summary(&[result]);

        assert!(text.contains("DISTRIBUIDOR: 2 existentes, 1 agregadas, 1 faltantes"));
        assert!(!text.contains("Errores:"));
    }

    #[test]
    fn test_summary_is_deterministic() {
        let results = vec![
            ProcessingResult::failure("a.xlsx", "m", vec!["e".to_string()]),
            ProcessingResult::failure("b.xlsx", "m", vec![]),
        ];
        assert_eq!(format_summary(&results), format_summary(&results));
    }
}
