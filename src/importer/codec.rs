// ==========================================
// 商业表格处理系统 - 工作簿编解码器
// ==========================================
// 职责: 二进制工作簿 ⇄ 内存网格
// 读取: calamine（xlsx / xlsm / xls / ods）
// 写出: rust_xlsxwriter（仅 xlsx）
// ==========================================

use crate::domain::grid::{Workbook, WorksheetGrid};
use crate::domain::types::CellValue;
use crate::importer::error::{PipelineError, PipelineResult};
use async_trait::async_trait;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;
use tracing::{debug, instrument};

// ==========================================
// WorkbookCodec Trait
// ==========================================
// 用途: 外部表格编解码边界
// 实现者: SpreadsheetCodec（测试中可替换为内存实现）
#[async_trait]
pub trait WorkbookCodec: Send + Sync {
    /// 解码工作簿，按工作簿中的顺序返回全部工作表
    async fn read_workbook(&self, file_name: &str, bytes: &[u8]) -> PipelineResult<Workbook>;

    /// 编码工作簿，按给定顺序写出工作表
    async fn write_workbook(&self, sheets: &[(String, WorksheetGrid)]) -> PipelineResult<Vec<u8>>;
}

// ==========================================
// SpreadsheetCodec 实现
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetCodec;

impl SpreadsheetCodec {
    pub fn new() -> Self {
        Self
    }
}

fn data_to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}

/// 将 calamine 区域还原为从 A1 开始的网格
fn range_to_grid(range: &calamine::Range<Data>) -> WorksheetGrid {
    let (start_row, start_col) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); start_row];
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; start_col];
        cells.extend(row.iter().map(data_to_cell));
        rows.push(cells);
    }
    WorksheetGrid::new(rows)
}

#[async_trait]
impl WorkbookCodec for SpreadsheetCodec {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn read_workbook(&self, file_name: &str, bytes: &[u8]) -> PipelineResult<Workbook> {
        let mut sheets = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
        let mut workbook = Workbook::new();

        for name in sheets.sheet_names() {
            let range = sheets.worksheet_range(&name)?;
            let grid = range_to_grid(&range);
            debug!(sheet = %name, rows = grid.rows().len(), "工作表读取完成");
            workbook.insert(name, grid);
        }

        Ok(workbook)
    }

    #[instrument(skip_all, fields(sheets = sheets.len()))]
    async fn write_workbook(&self, sheets: &[(String, WorksheetGrid)]) -> PipelineResult<Vec<u8>> {
        let mut book = rust_xlsxwriter::Workbook::new();

        for (name, grid) in sheets {
            let worksheet = book.add_worksheet();
            worksheet.set_name(name)?;

            for (r, row) in grid.rows().iter().enumerate() {
                let r = u32::try_from(r).map_err(|_| {
                    PipelineError::WorkbookWrite(format!("demasiadas filas en la hoja {}", name))
                })?;
                for (c, cell) in row.iter().enumerate() {
                    let c = u16::try_from(c).map_err(|_| {
                        PipelineError::WorkbookWrite(format!(
                            "demasiadas columnas en la hoja {}",
                            name
                        ))
                    })?;
                    match cell {
                        CellValue::Empty => {}
                        CellValue::Text(s) if s.is_empty() => {}
                        CellValue::Number(n) => {
                            worksheet.write_number(r, c, *n)?;
                        }
                        CellValue::Text(s) => {
                            worksheet.write_string(r, c, s)?;
                        }
                    }
                }
            }
        }

        Ok(book.save_to_buffer()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_to_cell() {
        assert_eq!(data_to_cell(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(data_to_cell(&Data::Float(1.5)), CellValue::Number(1.5));
        assert_eq!(data_to_cell(&Data::String("SN".into())), CellValue::text("SN"));
        assert_eq!(data_to_cell(&Data::Bool(true)), CellValue::text("true"));
        assert_eq!(data_to_cell(&Data::Empty), CellValue::Empty);
    }

    #[tokio::test]
    async fn test_read_garbage_fails() {
        let codec = SpreadsheetCodec::new();
        let result = codec.read_workbook("roto.xlsx", b"not a workbook").await;
        assert!(matches!(result, Err(PipelineError::WorkbookRead(_))));
    }
}
