// ==========================================
// 商业表格处理系统 - 数值/文本标准化
// ==========================================
// 职责: 区域格式数字解析（逗号小数点）/ 两位小数舍入 / 大写转换
// 策略: 无法解析的文本返回 0，不视为错误
// ==========================================

use crate::domain::types::CellValue;

/// 四舍五入到两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 尝试解析文本数字
///
/// # 规则
/// - 去除引号与空白
/// - 逗号小数点替换为句点（"10,5" → 10.5）
/// - 成功时四舍五入到两位小数
pub fn try_parse_numeric(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(round2)
}

/// 解析单元格为数字，失败回退为 0
pub fn parse_numeric_value(cell: &CellValue) -> f64 {
    match cell {
        CellValue::Number(n) => round2(*n),
        CellValue::Text(s) => try_parse_numeric(s).unwrap_or(0.0),
        CellValue::Empty => 0.0,
    }
}

/// 文本单元格转大写，其他类型原样返回
pub fn uppercase_text(cell: CellValue) -> CellValue {
    match cell {
        CellValue::Text(s) => CellValue::Text(s.to_uppercase()),
        other => other,
    }
}
