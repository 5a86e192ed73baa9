// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 内存编解码器、标准测试工作簿构造
// ==========================================

#![allow(dead_code)]

use async_trait::async_trait;
use planilla_proc::config::manifest::{
    CLIENTES_COLUMNS, DISTRIBUIDOR_COLUMNS, LISTA_PRECIOS_TRADICIONAL_COLUMNS,
};
use planilla_proc::importer::PipelineResult;
use planilla_proc::{ProcessingConfig, Workbook, WorkbookCodec, WorkbookProcessorImpl, WorksheetGrid};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// 已写出的工作簿（按写出顺序）
pub type WrittenBooks = Arc<Mutex<Vec<Vec<(String, WorksheetGrid)>>>>;

// ==========================================
// InMemoryCodec - 按文件名返回预置工作簿
// ==========================================
#[derive(Default)]
pub struct InMemoryCodec {
    books: HashMap<String, Workbook>,
    written: WrittenBooks,
}

impl InMemoryCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_book(mut self, file_name: &str, workbook: Workbook) -> Self {
        self.books.insert(file_name.to_string(), workbook);
        self
    }

    pub fn written(&self) -> WrittenBooks {
        Arc::clone(&self.written)
    }
}

#[async_trait]
impl WorkbookCodec for InMemoryCodec {
    async fn read_workbook(&self, file_name: &str, _bytes: &[u8]) -> PipelineResult<Workbook> {
        Ok(self.books.get(file_name).cloned().unwrap_or_default())
    }

    async fn write_workbook(&self, sheets: &[(String, WorksheetGrid)]) -> PipelineResult<Vec<u8>> {
        self.written.lock().unwrap().push(sheets.to_vec());
        Ok(b"xlsx".to_vec())
    }
}

/// 使用内存编解码器的处理器，同时返回写出记录
pub fn create_test_processor(codec: InMemoryCodec) -> (WorkbookProcessorImpl, WrittenBooks) {
    let written = codec.written();
    let processor =
        WorkbookProcessorImpl::with_codec(ProcessingConfig::default(), Box::new(codec));
    (processor, written)
}

// ==========================================
// 工作簿构造
// ==========================================

/// 文本行 → 网格
pub fn grid(rows: &[&[&str]]) -> WorksheetGrid {
    WorksheetGrid::from_text_rows(rows)
}

/// 去掉某些列后的必需列表头
pub fn header_without(columns: &[&'static str], skip: &[&str]) -> Vec<&'static str> {
    columns
        .iter()
        .copied()
        .filter(|c| !skip.contains(c))
        .collect()
}

/// 端到端场景工作簿
///
/// - DISTRIBUIDOR 缺 CUIT
/// - CLIENTES 缺 Codigo Lista precios，三行原始 Codigo 为 99 / 5 / 7
/// - 传统价格表一行，仅有 Precio Sin IVA = 100，IVA 21
pub fn e2e_workbook() -> Workbook {
    let distribuidor_header = header_without(DISTRIBUIDOR_COLUMNS, &["CUIT"]);
    let clientes_header = header_without(CLIENTES_COLUMNS, &["Codigo Lista precios"]);

    Workbook::new()
        .with_sheet(
            "DISTRIBUIDOR",
            grid(&[
                distribuidor_header.as_slice(),
                &["D-01", "Distribuidora Sur", "4444-5555", "ventas@sur.com", "Responsable Inscripto", "Ana"],
            ]),
        )
        .with_sheet(
            "LISTA DE PRECIOS",
            grid(&[&["Codigo", "Nombre"], &["LP-01", "Mayorista"], &["LP-02", "Minorista"]]),
        )
        .with_sheet(
            "LISTA DE PRECIOS TRADICIONAL",
            grid(&[
                LISTA_PRECIOS_TRADICIONAL_COLUMNS,
                &["LP-01", "P-100", "Pan Lactal", "Bimbo", "Panificados", "100", "21", ""],
            ]),
        )
        .with_sheet(
            "CLIENTES",
            grid(&[
                clientes_header.as_slice(),
                &["99", "Kiosco Uno", "Calle 1", "111", "", "", "Consumidor Final", "", "X"],
                &["5", "Almacen Dos", "Calle 2", "222", "", "", "Exento", ""],
                &["7", "Super Tres", "", "333", "", "", "", "", "", "X"],
            ]),
        )
}
