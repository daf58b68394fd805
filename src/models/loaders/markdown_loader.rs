use crate::error::{AppError, AppResult, FileError};
use crate::models::module::SourceDocument;
use crate::services::module_extractor::extract_modules;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

/// 读取 Markdown 文件并提取其中的模块
pub async fn load_source_document(markdown_path: &Path) -> AppResult<SourceDocument> {
    let content = fs::read_to_string(markdown_path)
        .await
        .map_err(|e| AppError::read_failed(markdown_path, e))?;

    Ok(SourceDocument::new(markdown_path, extract_modules(&content)))
}

/// 递归扫描目录，返回所有待处理的 Markdown 文件（按路径排序）
///
/// 路径中任意一级目录名与 `excluded_folders` 完全相同的文件会被跳过，
/// 名为 `response_file_name` 的缓存文件也不会被当作源文档。
pub async fn discover_markdown_files(
    root: &Path,
    excluded_folders: &[String],
    response_file_name: &str,
) -> AppResult<Vec<PathBuf>> {
    if !fs::metadata(root).await.map(|m| m.is_dir()).unwrap_or(false) {
        return Err(FileError::DirectoryNotFound {
            path: root.to_path_buf(),
        }
        .into());
    }

    let mut markdown_files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let Some(mut entries) = skip_unreadable(fs::read_dir(&dir).await, &dir) else {
            continue;
        };

        while let Some(Some(entry)) = skip_unreadable(entries.next_entry().await, &dir) {
            let path = entry.path();
            let Some(file_type) = skip_unreadable(entry.file_type().await, &path) else {
                continue;
            };

            if file_type.is_dir() {
                pending.push(path);
            } else if is_markdown(&path)
                && !is_excluded(&path, excluded_folders)
                && path.file_name().and_then(|s| s.to_str()) != Some(response_file_name)
            {
                markdown_files.push(path);
            }
        }
    }

    markdown_files.sort();
    Ok(markdown_files)
}

/// 读取失败时只告警，调用方跳过该目录或条目
fn skip_unreadable<T>(result: std::io::Result<T>, path: &Path) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("⚠️ 无法读取 {}，已跳过: {}", path.display(), e);
            None
        }
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("md")
}

/// 路径中是否存在与排除名单完全相同的一级
fn is_excluded(path: &Path, excluded_folders: &[String]) -> bool {
    path.components().any(|component| {
        component
            .as_os_str()
            .to_str()
            .map(|name| excluded_folders.iter().any(|excluded| excluded == name))
            .unwrap_or(false)
    })
}
