// ==========================================
// 商业表格处理系统 - 工作表网格与工作簿
// ==========================================
// 职责: 不可变的行列网格（第 0 行为表头）+ 工作表名称映射
// 红线: 插入列返回新网格，不在原网格上原地修改
// ==========================================

use crate::domain::types::CellValue;
use serde::{Deserialize, Serialize};

// ==========================================
// WorksheetGrid - 工作表网格
// ==========================================
// 源数据行可能参差不齐，缺失的尾部单元格视为缺失值
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorksheetGrid {
    rows: Vec<Vec<CellValue>>,
}

impl WorksheetGrid {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// 从文本行构造（测试与 CLI 辅助）
    pub fn from_text_rows(rows: &[&[&str]]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| CellValue::from(*c)).collect())
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<CellValue>> {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 表头文本（去除首尾空白，非文本单元格按显示值转换）
    pub fn headers(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|row| row.iter().map(|c| c.to_string().trim().to_string()).collect())
            .unwrap_or_default()
    }

    /// 数据行（不含表头）
    pub fn data_rows(&self) -> &[Vec<CellValue>] {
        if self.rows.is_empty() {
            &[]
        } else {
            &self.rows[1..]
        }
    }

    pub fn data_row_count(&self) -> usize {
        self.data_rows().len()
    }

    /// 在 index 处插入一列，返回新网格
    ///
    /// # 规则
    /// - 表头行在 index 处写入列名
    /// - 数据行在 index 处写入空字符串
    /// - 行长度不足 index 时先以 Empty 补齐，保证列对齐
    pub fn insert_column(&self, index: usize, header: &str) -> WorksheetGrid {
        let mut rows = Vec::with_capacity(self.rows.len().max(1));

        if self.rows.is_empty() {
            let mut header_row = vec![CellValue::Empty; index];
            header_row.push(CellValue::text(header));
            rows.push(header_row);
            return WorksheetGrid { rows };
        }

        for (row_idx, row) in self.rows.iter().enumerate() {
            let mut new_row = row.clone();
            if new_row.len() < index {
                new_row.resize(index, CellValue::Empty);
            }
            let value = if row_idx == 0 {
                CellValue::text(header)
            } else {
                CellValue::text("")
            };
            new_row.insert(index, value);
            rows.push(new_row);
        }

        WorksheetGrid { rows }
    }

    /// 表头长度（新增列默认追加到该位置）
    pub fn header_len(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }
}

// ==========================================
// Workbook - 工作表名称 → 网格
// ==========================================
// 保留源文件中的工作表顺序
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    sheets: Vec<(String, WorksheetGrid)>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, name: impl Into<String>, grid: WorksheetGrid) -> Self {
        self.insert(name, grid);
        self
    }

    /// 同名（大小写不敏感）工作表存在时替换，否则追加
    pub fn insert(&mut self, name: impl Into<String>, grid: WorksheetGrid) {
        let name = name.into();
        match self
            .sheets
            .iter_mut()
            .find(|(existing, _)| same_sheet_name(existing, &name))
        {
            Some(slot) => slot.1 = grid,
            None => self.sheets.push((name, grid)),
        }
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// 按名称查找（去空白 + 大小写不敏感的完整匹配）
    pub fn sheet(&self, name: &str) -> Option<&WorksheetGrid> {
        self.sheets
            .iter()
            .find(|(existing, _)| same_sheet_name(existing, name))
            .map(|(_, grid)| grid)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sheet(name).is_some()
    }

    pub fn sheets(&self) -> &[(String, WorksheetGrid)] {
        &self.sheets
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

/// 工作表名称比较: 去空白 + 大小写不敏感
fn same_sheet_name(a: &str, b: &str) -> bool {
    a.trim().to_uppercase() == b.trim().to_uppercase()
}
