// ==========================================
// 商业表格处理系统 - 处理配置
// ==========================================
// 职责: 条件代码表、默认 IVA 税率、输出文件前缀、支持的扩展名
// 存储: 可选 JSON 文件，缺失字段取默认值
// ==========================================

use crate::importer::error::{PipelineError, PipelineResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// 条件代码表的一项（标签 → 数字代码）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionCodeEntry {
    pub label: String,
    pub code: u32,
}

impl ConditionCodeEntry {
    pub fn new(label: &str, code: u32) -> Self {
        Self {
            label: label.to_string(),
            code,
        }
    }
}

// ==========================================
// ProcessingConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// 匹配按列表顺序进行，同一层级内先出现者优先
    pub condition_codes: Vec<ConditionCodeEntry>,

    /// % IVA 缺失或为占位符时使用
    pub default_iva_rate: f64,

    /// 输出文件名前缀
    pub output_prefix: String,

    /// 允许的输入文件扩展名（小写，不含点）
    pub supported_extensions: Vec<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            condition_codes: default_condition_codes(),
            default_iva_rate: 21.0,
            output_prefix: "procesado_".to_string(),
            supported_extensions: ["xlsx", "xlsm", "xls", "ods"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// AFIP 增值税身份
pub fn default_condition_codes() -> Vec<ConditionCodeEntry> {
    vec![
        ConditionCodeEntry::new("Responsable Inscripto", 1),
        ConditionCodeEntry::new("Responsable No Inscripto", 2),
        ConditionCodeEntry::new("No Responsable", 3),
        ConditionCodeEntry::new("Exento", 4),
        ConditionCodeEntry::new("Consumidor Final", 5),
        ConditionCodeEntry::new("Responsable Monotributo", 6),
    ]
}

impl ProcessingConfig {
    /// 从 JSON 文件加载配置
    ///
    /// # 返回
    /// - Ok(ProcessingConfig): 未出现的字段取默认值
    /// - Err(PipelineError::Io): 文件不可读
    /// - Err(PipelineError::Config): JSON 非法或配置值无效
    pub fn from_json_file(path: &Path) -> PipelineResult<Self> {
        debug!(path = %path.display(), "读取处理配置");
        let raw = std::fs::read_to_string(path)?;

        let config: ProcessingConfig = serde_json::from_str(&raw)?;
        config.validate()?;

        info!(
            conditions = config.condition_codes.len(),
            default_iva_rate = config.default_iva_rate,
            "处理配置已加载"
        );
        Ok(config)
    }

    /// 配置值校验
    pub fn validate(&self) -> PipelineResult<()> {
        if !self.default_iva_rate.is_finite() || self.default_iva_rate < 0.0 {
            return Err(PipelineError::Config {
                key: "default_iva_rate".to_string(),
                message: format!("valor inválido: {}", self.default_iva_rate),
            });
        }
        if self.supported_extensions.is_empty() {
            return Err(PipelineError::Config {
                key: "supported_extensions".to_string(),
                message: "la lista no puede estar vacía".to_string(),
            });
        }
        Ok(())
    }

    /// 扩展名是否受支持（大小写不敏感）
    pub fn is_supported_extension(&self, ext: &str) -> bool {
        let ext = ext.trim_start_matches('.').to_lowercase();
        self.supported_extensions
            .iter()
            .any(|s| s.trim_start_matches('.').eq_ignore_ascii_case(&ext))
    }
}
