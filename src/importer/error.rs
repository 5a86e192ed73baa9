// ==========================================
// 商业表格处理系统 - 处理管道错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 错误文本面向最终用户（西班牙语）
// ==========================================

use thiserror::Error;

/// 处理管道错误类型
#[derive(Error, Debug)]
pub enum PipelineError {
    // ===== 文件相关错误 =====
    #[error("Formato de archivo no soportado: {0}")]
    UnsupportedFormat(String),

    #[error("Error al leer el libro: {0}")]
    WorkbookRead(String),

    #[error("Error al escribir el libro: {0}")]
    WorkbookWrite(String),

    // ===== 结构错误 =====
    #[error("Faltan hojas requeridas: {}", .0.join(", "))]
    MissingWorksheets(Vec<String>),

    #[error("No se pudo insertar la columna '{column}' en la hoja {sheet}: falta la columna de referencia '{anchor}'")]
    MissingAnchorColumn {
        sheet: String,
        column: String,
        anchor: String,
    },

    #[error("No se encontró la columna '{column}' en la hoja {sheet}")]
    MissingColumn { sheet: String, column: String },

    // ===== 配置错误 =====
    #[error("Error de configuración ({key}): {message}")]
    Config { key: String, message: String },

    // ===== 通用错误 =====
    #[error("Error de E/S: {0}")]
    Io(String),
}

impl PipelineError {
    /// 失败结果中的结构化错误列表
    pub fn details(&self) -> Vec<String> {
        match self {
            PipelineError::MissingWorksheets(sheets) => sheets
                .iter()
                .map(|s| format!("Falta la hoja: {}", s))
                .collect(),
            other => vec![other.to_string()],
        }
    }

    /// 失败结果的摘要消息
    pub fn summary_message(&self) -> String {
        match self {
            PipelineError::UnsupportedFormat(_) => "Formato de archivo no soportado".to_string(),
            PipelineError::MissingWorksheets(_) => {
                "El archivo no contiene todas las hojas requeridas".to_string()
            }
            PipelineError::MissingAnchorColumn { .. } | PipelineError::MissingColumn { .. } => {
                "No se pudo completar la estructura de columnas".to_string()
            }
            other => format!("Error al procesar el archivo: {}", other),
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Io(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for PipelineError {
    fn from(err: calamine::Error) -> Self {
        PipelineError::WorkbookRead(err.to_string())
    }
}

// 实现 From<rust_xlsxwriter::XlsxError>
impl From<rust_xlsxwriter::XlsxError> for PipelineError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        PipelineError::WorkbookWrite(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Config {
            key: "json".to_string(),
            message: err.to_string(),
        }
    }
}

/// Result 类型别名
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_worksheets_details() {
        let err = PipelineError::MissingWorksheets(vec!["CLIENTES".to_string()]);
        assert_eq!(err.details(), vec!["Falta la hoja: CLIENTES".to_string()]);
    }

    #[test]
    fn test_anchor_error_message_names_columns() {
        let err = PipelineError::MissingAnchorColumn {
            sheet: "CLIENTES".to_string(),
            column: "Codigo Lista precios".to_string(),
            anchor: "Visita Lunes".to_string(),
        };
        let details = err.details();
        assert_eq!(details.len(), 1);
        assert!(details[0].contains("Codigo Lista precios"));
        assert!(details[0].contains("Visita Lunes"));
    }
}
