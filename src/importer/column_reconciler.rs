// ==========================================
// 商业表格处理系统 - 列结构修复
// ==========================================
// 职责: 检测缺失的必需列，并按位置规则插入
// 位置规则:
//   - DISTRIBUIDOR 缺 CUIT → 插入到 Nombre 之前
//   - CLIENTES 缺 Codigo Lista precios → 插入到 Visita Lunes 之前
//   - 其他 → 追加到表头末尾
// 红线: 锚点列缺失时整个文件失败，不退化为追加
// ==========================================

use crate::config::RequiredColumnManifest;
use crate::domain::grid::{Workbook, WorksheetGrid};
use crate::domain::report::ColumnValidationResult;
use crate::domain::types::SheetKind;
use crate::importer::error::{PipelineError, PipelineResult};
use crate::importer::header_match::{find_column, find_column_with_all, resolve_columns};
use tracing::{debug, info, warn};

// ==========================================
// 位置规则
// ==========================================

/// 锚点列的查找方式
#[derive(Debug, Clone, Copy)]
enum Anchor {
    /// 按列名解析（完全匹配优先）
    Column(&'static str),
    /// 同时包含全部关键词的第一列
    AllKeywords(&'static [&'static str], &'static str),
}

impl Anchor {
    fn locate(&self, headers: &[String]) -> Option<usize> {
        match self {
            Anchor::Column(name) => find_column(headers, name, &[]),
            Anchor::AllKeywords(keywords, _) => find_column_with_all(headers, keywords),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Anchor::Column(name) => *name,
            Anchor::AllKeywords(_, label) => *label,
        }
    }
}

/// 缺失列插入到锚点列之前
struct PositionalRule {
    sheet: SheetKind,
    column: &'static str,
    anchor: Anchor,
}

const POSITIONAL_RULES: &[PositionalRule] = &[
    PositionalRule {
        sheet: SheetKind::Distribuidor,
        column: "CUIT",
        anchor: Anchor::Column("Nombre"),
    },
    PositionalRule {
        sheet: SheetKind::Clientes,
        column: "Codigo Lista precios",
        anchor: Anchor::AllKeywords(&["visita", "lunes"], "Visita Lunes"),
    },
];

// ==========================================
// ReconciliationOutcome
// ==========================================
#[derive(Debug, Clone)]
pub struct ReconciliationOutcome {
    /// 仅有插入的工作表被改写
    pub workbook: Workbook,
    /// 每张必需工作表一份，按固定顺序
    pub validations: Vec<ColumnValidationResult>,
}

// ==========================================
// ColumnReconciler
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ColumnReconciler {
    manifest: RequiredColumnManifest,
}

impl ColumnReconciler {
    pub fn new(manifest: RequiredColumnManifest) -> Self {
        Self { manifest }
    }

    /// 修复四张必需工作表
    pub fn reconcile(&self, workbook: &Workbook) -> PipelineResult<ReconciliationOutcome> {
        let mut updated = workbook.clone();
        let mut validations = Vec::with_capacity(SheetKind::ALL.len());

        for kind in SheetKind::ALL {
            let grid = workbook
                .sheet(kind.sheet_name())
                .ok_or_else(|| {
                    PipelineError::MissingWorksheets(vec![kind.sheet_name().to_string()])
                })?;

            let (grid_after, validation) = self.reconcile_sheet(kind, grid)?;

            if !validation.added_columns.is_empty() {
                updated.insert(kind.sheet_name(), grid_after);
            }
            validations.push(validation);
        }

        Ok(ReconciliationOutcome {
            workbook: updated,
            validations,
        })
    }

    /// 修复单张工作表
    ///
    /// # 返回
    /// - Ok((新网格, 校验结果)): 无缺失时新网格与原网格相同
    /// - Err(MissingAnchorColumn): 位置规则找不到锚点列
    pub fn reconcile_sheet(
        &self,
        kind: SheetKind,
        grid: &WorksheetGrid,
    ) -> PipelineResult<(WorksheetGrid, ColumnValidationResult)> {
        let required = self.manifest.required_columns(kind);
        let original_headers = grid.headers();

        // 与规则引擎相同的分配方式: 已被其他必需列占用的表头不算存在
        let mut existing = Vec::new();
        let mut missing = Vec::new();
        for (col, idx) in required
            .iter()
            .copied()
            .zip(resolve_columns(&original_headers, required))
        {
            match idx {
                Some(_) => existing.push(col),
                None => missing.push(col),
            }
        }

        debug!(
            sheet = %kind,
            existing = existing.len(),
            missing = missing.len(),
            "列存在性检测完成"
        );

        let mut current = grid.clone();
        let mut added = Vec::with_capacity(missing.len());

        for column in &missing {
            let index = self.insertion_index(kind, column, &current)?;
            current = current.insert_column(index, column);
            added.push(column.to_string());
            info!(sheet = %kind, column = %column, index = index, "已插入缺失列");
        }

        let validation = ColumnValidationResult {
            sheet_name: kind.sheet_name().to_string(),
            missing_columns: missing.iter().map(|c| c.to_string()).collect(),
            added_columns: added,
            existing_columns: existing.iter().map(|c| c.to_string()).collect(),
        };

        Ok((current, validation))
    }

    /// 缺失列的插入位置
    fn insertion_index(
        &self,
        kind: SheetKind,
        column: &str,
        grid: &WorksheetGrid,
    ) -> PipelineResult<usize> {
        let rule = POSITIONAL_RULES
            .iter()
            .find(|r| r.sheet == kind && r.column == column);

        match rule {
            Some(rule) => {
                let headers = grid.headers();
                rule.anchor.locate(&headers).ok_or_else(|| {
                    warn!(sheet = %kind, column = %column, anchor = rule.anchor.label(), "锚点列缺失");
                    PipelineError::MissingAnchorColumn {
                        sheet: kind.sheet_name().to_string(),
                        column: column.to_string(),
                        anchor: rule.anchor.label().to_string(),
                    }
                })
            }
            None => Ok(grid.header_len()),
        }
    }
}
