use std::path::{Path, PathBuf};
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 内容生成错误
    #[error("生成错误: {0}")]
    Generation(#[from] GenerationError),
    /// 单个模块的组装错误
    #[error("模块错误: {0}")]
    Module(#[from] ModuleError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 内容生成服务错误
#[derive(Debug, Error)]
pub enum GenerationError {
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {message}")]
    ApiCallFailed { model: String, message: String },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
    /// 返回的代码块数量与请求的模块数量不一致
    #[error("生成结果格式错误: 期望 {expected} 个模块代码块, 实际 {found} 个")]
    FormatMismatch { expected: usize, found: usize },
    /// 代码块的一级标题与请求的模块标题对不上
    #[error("生成结果与请求不一致: 模块 {index} 期望 '{expected}', 实际 {found:?}")]
    TitleMismatch {
        index: usize,
        expected: String,
        found: Option<String>,
    },
}

/// 模块组装错误
#[derive(Debug, Error)]
pub enum ModuleError {
    /// 生成内容中缺少资源插入标记
    #[error("模块 {index} ({title}) 缺少插入标记 '{marker}'")]
    MarkerMissing {
        index: usize,
        title: String,
        marker: &'static str,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({}): {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({}): {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// 删除文件失败
    #[error("删除文件失败 ({}): {source}", .path.display())]
    DeleteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// 创建目录失败
    #[error("创建目录失败 ({}): {source}", .path.display())]
    CreateDirFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// 目录不存在
    #[error("目录不存在: {}", .path.display())]
    DirectoryNotFound { path: PathBuf },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 模板文件加载失败
    #[error("无法加载模板文件 ({}): {source}", .path.display())]
    TemplateLoadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// 配置文件解析失败
    #[error("配置文件解析失败 ({}): {message}", .path.display())]
    ParseFailed { path: PathBuf, message: String },
    /// 配置项取值非法
    #[error("配置项 {field} 取值非法: '{value}'")]
    InvalidValue { field: &'static str, value: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn read_failed(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn write_failed(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }

    /// 创建文件删除错误
    pub fn delete_failed(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        AppError::File(FileError::DeleteFailed {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }

    /// 创建LLM API调用错误
    pub fn llm_api_failed(model: impl Into<String>, source: impl std::fmt::Display) -> Self {
        AppError::Generation(GenerationError::ApiCallFailed {
            model: model.into(),
            message: source.to_string(),
        })
    }

    /// 是否为生成结果格式错误（代码块数量不匹配）
    pub fn is_format_mismatch(&self) -> bool {
        matches!(
            self,
            AppError::Generation(GenerationError::FormatMismatch { .. })
        )
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
