// ==========================================
// 商业表格处理系统 - 增值税身份代码映射
// ==========================================
// 职责: 文本 → 数字代码的模糊查找
// 规则: 按层级依次尝试（完全匹配 → 子串匹配 → 首词匹配），
//       层级内按代码表顺序取第一个命中项
// ==========================================

use crate::config::ConditionCodeEntry;
use crate::domain::types::{CellValue, PLACEHOLDER};
use serde::Serialize;

/// 单层匹配函数: (小写输入, 小写标签) → 是否命中
type MatchFn = fn(&str, &str) -> bool;

/// 匹配层级，按顺序尝试
pub const MATCH_TIERS: [(&str, MatchFn); 3] = [
    ("exacto", exact_match),
    ("subcadena", substring_match),
    ("primera_palabra", first_word_match),
];

fn exact_match(input: &str, label: &str) -> bool {
    input == label
}

fn substring_match(input: &str, label: &str) -> bool {
    label.contains(input) || input.contains(label)
}

/// 首词匹配（处理 "Resp. Inscripto" 这类缩写）
fn first_word_match(input: &str, label: &str) -> bool {
    let input_word = first_word(input);
    let label_word = first_word(label);

    (!input_word.is_empty() && label.contains(input_word))
        || (!label_word.is_empty() && input.contains(label_word))
}

/// 第一个空白分隔的词，去掉首尾标点
fn first_word(text: &str) -> &str {
    text.split_whitespace()
        .next()
        .unwrap_or("")
        .trim_matches(|c: char| !c.is_alphanumeric())
}

// ==========================================
// 映射结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ConditionMatch {
    /// 命中代码表
    Code(u32),
    /// 未命中，返回去空白后的原文
    Unmatched(String),
    /// 占位符或空值，不做查找
    Passthrough(String),
}

impl ConditionMatch {
    pub fn into_cell(self) -> CellValue {
        match self {
            ConditionMatch::Code(code) => CellValue::Number(code as f64),
            ConditionMatch::Unmatched(text) | ConditionMatch::Passthrough(text) => {
                CellValue::Text(text)
            }
        }
    }
}

// ==========================================
// ConditionCodeMapper
// ==========================================
#[derive(Debug, Clone)]
pub struct ConditionCodeMapper {
    // (小写标签, 代码)，保持配置顺序
    entries: Vec<(String, u32)>,
}

impl ConditionCodeMapper {
    pub fn new(entries: &[ConditionCodeEntry]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|e| (e.label.trim().to_lowercase(), e.code))
                .collect(),
        }
    }

    /// 文本 → 代码或原文
    pub fn map_condition(&self, text: &str) -> ConditionMatch {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == PLACEHOLDER {
            return ConditionMatch::Passthrough(text.to_string());
        }

        let needle = trimmed.to_lowercase();
        for (_tier, matches) in MATCH_TIERS.iter() {
            if let Some((_, code)) = self
                .entries
                .iter()
                .find(|(label, _)| matches(&needle, label))
            {
                return ConditionMatch::Code(*code);
            }
        }

        ConditionMatch::Unmatched(trimmed.to_string())
    }

    /// 单元格映射: 数字与空单元格原样返回
    pub fn map_cell(&self, cell: CellValue) -> CellValue {
        match cell {
            CellValue::Text(text) => self.map_condition(&text).into_cell(),
            other => other,
        }
    }
}

impl Default for ConditionCodeMapper {
    fn default() -> Self {
        Self::new(&crate::config::default_condition_codes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> ConditionCodeMapper {
        ConditionCodeMapper::default()
    }

    #[test]
    fn test_exact_match_case_insensitive() {
        let m = mapper();
        assert_eq!(m.map_condition("responsable inscripto"), ConditionMatch::Code(1));
        assert_eq!(m.map_condition("RESPONSABLE INSCRIPTO"), ConditionMatch::Code(1));
        assert_eq!(m.map_condition("  Consumidor Final "), ConditionMatch::Code(5));
    }

    #[test]
    fn test_exact_beats_substring() {
        // "no responsable" 是 "responsable no inscripto" 之外的独立条目
        assert_eq!(mapper().map_condition("No Responsable"), ConditionMatch::Code(3));
        assert_eq!(
            mapper().map_condition("Responsable No Inscripto"),
            ConditionMatch::Code(2)
        );
    }

    #[test]
    fn test_substring_match_either_direction() {
        let m = mapper();
        assert_eq!(m.map_condition("Monotributo"), ConditionMatch::Code(6));
        assert_eq!(m.map_condition("IVA Exento"), ConditionMatch::Code(4));
    }

    #[test]
    fn test_first_word_abbreviation() {
        assert_eq!(mapper().map_condition("Resp. Inscripto"), ConditionMatch::Code(1));
    }

    #[test]
    fn test_unmatched_returns_trimmed_original() {
        assert_eq!(
            mapper().map_condition("  Sujeto Extranjero "),
            ConditionMatch::Unmatched("Sujeto Extranjero".to_string())
        );
    }

    #[test]
    fn test_placeholder_and_empty_passthrough() {
        let m = mapper();
        assert_eq!(m.map_condition("SN"), ConditionMatch::Passthrough("SN".to_string()));
        assert_eq!(m.map_condition(""), ConditionMatch::Passthrough(String::new()));
    }

    #[test]
    fn test_custom_table_order_decides_ties() {
        let m = ConditionCodeMapper::new(&[
            ConditionCodeEntry::new("Exento Total", 10),
            ConditionCodeEntry::new("Exento Parcial", 11),
        ]);
        assert_eq!(m.map_condition("exento"), ConditionMatch::Code(10));
    }

    #[test]
    fn test_map_cell_numeric_untouched() {
        assert_eq!(mapper().map_cell(CellValue::Number(1.0)), CellValue::Number(1.0));
        assert_eq!(
            mapper().map_cell(CellValue::text("exento")),
            CellValue::Number(4.0)
        );
    }
}
