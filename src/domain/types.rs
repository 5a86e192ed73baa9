// ==========================================
// 商业表格处理系统 - 领域类型定义
// ==========================================
// 职责: 单元格值、工作表种类、占位符常量
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 缺失单元格的占位值（visita 列除外，visita 列使用空字符串）
pub const PLACEHOLDER: &str = "SN";

// ==========================================
// 单元格值 (Cell Value)
// ==========================================
// 序列化格式: untagged（文本 → JSON 字符串，数字 → JSON 数字，空 → null）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn placeholder() -> Self {
        CellValue::Text(PLACEHOLDER.to_string())
    }

    /// 空单元格或仅含空白的文本视为缺失
    pub fn is_absent(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// 缺失或占位符 "SN"
    pub fn is_placeholder(&self) -> bool {
        match self {
            CellValue::Text(s) => s.trim().is_empty() || s.trim() == PLACEHOLDER,
            other => other.is_absent(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// 缺失时回退到 "SN"
    pub fn or_placeholder(self) -> Self {
        if self.is_absent() {
            CellValue::placeholder()
        } else {
            self
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

// ==========================================
// 工作表种类 (Sheet Kind)
// ==========================================
// 处理顺序固定: Clientes 依赖 ListaPrecios 的首条记录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SheetKind {
    Distribuidor,
    ListaPrecios,
    ListaPreciosTradicional,
    Clientes,
}

impl SheetKind {
    pub const ALL: [SheetKind; 4] = [
        SheetKind::Distribuidor,
        SheetKind::ListaPrecios,
        SheetKind::ListaPreciosTradicional,
        SheetKind::Clientes,
    ];

    /// 工作簿中的工作表名称（大小写不敏感匹配）
    pub fn sheet_name(&self) -> &'static str {
        match self {
            SheetKind::Distribuidor => "DISTRIBUIDOR",
            SheetKind::ListaPrecios => "LISTA DE PRECIOS",
            SheetKind::ListaPreciosTradicional => "LISTA DE PRECIOS TRADICIONAL",
            SheetKind::Clientes => "CLIENTES",
        }
    }
}

impl fmt::Display for SheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sheet_name())
    }
}
