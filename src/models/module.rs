use std::path::{Path, PathBuf};

/// 源文档中的一个模块
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleRecord {
    /// 模块标题（`## Module ...:` 之后的文字）
    pub title: String,
    /// 标题下方原样保留的资源内容
    pub resource: String,
}

impl ModuleRecord {
    pub fn new(title: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            resource: resource.into(),
        }
    }
}

/// 待处理的源文档及其模块（按文档顺序）
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub modules: Vec<ModuleRecord>,
}

impl SourceDocument {
    pub fn new(path: impl Into<PathBuf>, modules: Vec<ModuleRecord>) -> Self {
        Self {
            path: path.into(),
            modules,
        }
    }

    /// 输出目录（源文档所在目录）
    pub fn folder(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// 所有模块标题，保持文档顺序
    pub fn module_titles(&self) -> Vec<String> {
        self.modules.iter().map(|m| m.title.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// 文件名（仅用于日志）
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}
