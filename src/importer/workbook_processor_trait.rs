// ==========================================
// 商业表格处理系统 - 工作簿处理 Trait
// ==========================================
// 职责: 定义批处理接口（不包含实现）
// ==========================================

use crate::domain::report::ProcessingResult;
use async_trait::async_trait;

/// 待处理的上传文件（名称 + 原始字节）
#[derive(Debug, Clone)]
pub struct InputFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

// ==========================================
// WorkbookProcessor Trait
// ==========================================
// 用途: 处理管道主接口
// 实现者: WorkbookProcessorImpl
#[async_trait]
pub trait WorkbookProcessor: Send + Sync {
    /// 处理单个文件
    ///
    /// # 流程
    /// 1. 扩展名校验
    /// 2. 解码工作簿
    /// 3. 必需工作表校验（缺失即返回失败，不做后续步骤）
    /// 4. 列结构修复
    /// 5. 业务规则
    /// 6. 写出输出工作簿
    ///
    /// # 返回
    /// 总是返回 ProcessingResult；任何错误都转为失败结果
    async fn process_file(&self, input: &InputFile) -> ProcessingResult;

    /// 按输入顺序逐个处理文件
    ///
    /// # 说明
    /// - 顺序执行，不并发
    /// - 单个文件失败不影响其他文件
    async fn process_files(&self, inputs: &[InputFile]) -> Vec<ProcessingResult>;
}
