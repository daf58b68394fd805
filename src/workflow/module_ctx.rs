//! 模块处理上下文
//!
//! 封装"我正在处理哪篇文档的第几个模块"这一信息

use std::fmt::Display;

/// 模块处理上下文
#[derive(Debug, Clone)]
pub struct ModuleCtx {
    /// 文档索引（仅用于日志显示）
    pub document_index: usize,

    /// 模块在文档中的序号（从1开始，同时决定输出文件名前缀）
    pub module_index: usize,

    /// 模块标题
    pub title: String,
}

impl ModuleCtx {
    /// 创建新的模块上下文
    pub fn new(document_index: usize, module_index: usize, title: impl Into<String>) -> Self {
        Self {
            document_index,
            module_index,
            title: title.into(),
        }
    }
}

impl Display for ModuleCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[文档 {} 模块#{} {}]",
            self.document_index, self.module_index, self.title
        )
    }
}
