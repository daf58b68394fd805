//! 生成结果缓存 - 基础设施层
//!
//! 持有一篇文档的 `response.md`，只暴露读、写、删三个能力

use crate::error::{AppError, AppResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 生成结果缓存
///
/// 职责：
/// - 生成成功后立即落盘，中断后重跑不会重复调用生成服务
/// - 不认识模块和标题
/// - 只属于一个文档任务
#[derive(Debug, Clone)]
pub struct ResponseCache {
    path: PathBuf,
}

impl ResponseCache {
    /// 缓存文件位于文档所在目录
    pub fn new(document_folder: &Path, file_name: &str) -> Self {
        Self {
            path: document_folder.join(file_name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取缓存；文件不存在时返回 `None`
    pub async fn load(&self) -> AppResult<Option<String>> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::read_failed(&self.path, e)),
        }
    }

    /// 写入缓存
    pub async fn store(&self, response: &str) -> AppResult<()> {
        fs::write(&self.path, response)
            .await
            .map_err(|e| AppError::write_failed(&self.path, e))
    }

    /// 删除缓存；文件不存在视为成功，返回是否真的删除了文件
    pub async fn remove(&self) -> AppResult<bool> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::delete_failed(&self.path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_load_remove() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path(), "response.md");
        assert_eq!(cache.path(), dir.path().join("response.md"));

        assert_eq!(cache.load().await.unwrap(), None);

        cache.store("```markdown\n# A\n```").await.unwrap();
        assert_eq!(
            cache.load().await.unwrap().as_deref(),
            Some("```markdown\n# A\n```")
        );

        assert!(cache.remove().await.unwrap());
        assert!(!cache.remove().await.unwrap());
        assert_eq!(cache.load().await.unwrap(), None);
    }
}
