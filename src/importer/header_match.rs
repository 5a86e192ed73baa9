// ==========================================
// 商业表格处理系统 - 表头匹配
// ==========================================
// 职责: 列存在性判定、列索引解析、锚点列查找
// 说明: 所有表头匹配都经由本模块，启发式规则只在这里定义
// ==========================================

/// 表头标准化: 去空白 + 小写
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// 必需列是否由该表头满足
///
/// # 规则
/// - 大小写不敏感
/// - 表头包含必需列名即视为满足（"Nombre Fantasia" 满足 "Nombre"）
pub fn header_matches(header: &str, required: &str) -> bool {
    let header = normalize_header(header);
    let required = normalize_header(required);
    !required.is_empty() && header.contains(&required)
}

/// 为一组必需列分配表头列
///
/// # 规则
/// 1. 所有列名先做完全匹配
/// 2. 未命中的列名再做子串匹配
/// 3. 一个表头只归属一个列名
///
/// 列存在性检测与规则引擎的列解析都经由此处，两者结论一致
pub fn resolve_columns(headers: &[String], names: &[&str]) -> Vec<Option<usize>> {
    let mut taken = vec![false; headers.len()];
    let mut resolved: Vec<Option<usize>> = vec![None; names.len()];

    for (i, name) in names.iter().enumerate() {
        if let Some(idx) = find_exact_column(headers, name, &taken) {
            taken[idx] = true;
            resolved[i] = Some(idx);
        }
    }

    for (i, name) in names.iter().enumerate() {
        if resolved[i].is_some() {
            continue;
        }
        if let Some(idx) = find_column(headers, name, &taken) {
            taken[idx] = true;
            resolved[i] = Some(idx);
        }
    }

    resolved
}

/// 解析列索引，跳过已占用的列
///
/// # 规则
/// 1. 优先完全匹配（大小写不敏感）
/// 2. 其次取第一个包含列名的表头
pub fn find_column(headers: &[String], name: &str, taken: &[bool]) -> Option<usize> {
    find_exact_column(headers, name, taken).or_else(|| {
        headers
            .iter()
            .enumerate()
            .position(|(idx, h)| !is_taken(taken, idx) && header_matches(h, name))
    })
}

/// 仅完全匹配（大小写不敏感），跳过已占用的列
pub fn find_exact_column(headers: &[String], name: &str, taken: &[bool]) -> Option<usize> {
    let wanted = normalize_header(name);
    headers
        .iter()
        .enumerate()
        .position(|(idx, h)| !is_taken(taken, idx) && normalize_header(h) == wanted)
}

fn is_taken(taken: &[bool], idx: usize) -> bool {
    taken.get(idx).copied().unwrap_or(false)
}

/// 查找同时包含所有关键词的第一列（如 "visita" + "lunes"）
pub fn find_column_with_all(headers: &[String], keywords: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = normalize_header(h);
        keywords.iter().all(|k| h.contains(&normalize_header(k)))
    })
}

/// 表头是否以给定前缀开头（大小写不敏感）
pub fn header_starts_with(header: &str, prefix: &str) -> bool {
    normalize_header(header).starts_with(&normalize_header(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_header_matches_case_insensitive_contains() {
        assert!(header_matches("  EMAIL ", "Email"));
        assert!(header_matches("Nombre Fantasia", "Nombre"));
        assert!(!header_matches("Codigo", "Codigo Lista precios"));
    }

    #[test]
    fn test_find_column_prefers_exact() {
        let h = headers(&["Codigo Lista precios", "Nombre", "codigo"]);
        assert_eq!(find_column(&h, "Codigo", &[]), Some(2));
    }

    #[test]
    fn test_find_column_skips_taken() {
        let h = headers(&["Codigo Lista precios", "Nombre"]);
        let taken = vec![true, false];
        assert_eq!(find_column(&h, "Codigo", &taken), None);
        assert_eq!(find_column(&h, "Codigo", &[]), Some(0));
    }

    #[test]
    fn test_resolve_columns_one_header_per_name() {
        let h = headers(&["Codigo Lista precios", "Nombre Fantasia", "Nombre"]);

        let resolved = resolve_columns(&h, &["Codigo", "Nombre", "Codigo Lista precios"]);

        // "Codigo Lista precios" 已被完全匹配占用，Codigo 视为缺失
        assert_eq!(resolved, vec![None, Some(2), Some(0)]);
    }

    #[test]
    fn test_resolve_columns_substring_fallback() {
        let h = headers(&["Nombre Fantasia", "codigo"]);
        assert_eq!(resolve_columns(&h, &["Codigo", "Nombre"]), vec![Some(1), Some(0)]);
    }

    #[test]
    fn test_find_column_with_all_keywords() {
        let h = headers(&["Codigo", "Visita Martes", "VISITA LUNES"]);
        assert_eq!(find_column_with_all(&h, &["visita", "lunes"]), Some(2));
        assert_eq!(find_column_with_all(&h, &["visita", "domingo"]), None);
    }
}
