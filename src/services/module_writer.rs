//! 模块文件写入服务 - 业务能力层
//!
//! 只负责"写一个模块文件"能力

use crate::error::{AppError, AppResult, FileError};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// 写入模块文件，自动创建缺失的父目录，已存在的文件会被覆盖
pub async fn write_module_file(output_path: &Path, content: &str) -> AppResult<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| FileError::CreateDirFailed {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    fs::write(output_path, content)
        .await
        .map_err(|e| AppError::write_failed(output_path, e))?;

    debug!("写入完成: {} ({} 字符)", output_path.display(), content.len());
    Ok(())
}
