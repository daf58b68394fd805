//! 单个文档处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责处理单篇源文档的所有模块，是文档级别的编排器。
//!
//! ## 核心功能
//!
//! 1. **提取模块**：没有模块的文档直接跳过
//! 2. **生成内容**：优先读取 `response.md` 缓存，否则调用生成服务并立即落盘
//! 3. **拆分校验**：代码块数量和一级标题必须与模块一一对应，
//!    对不上的缓存视为过期并重新生成
//! 4. **并发写入**：委托 `ModuleFlow` 组装并写入每个模块（有并发上限）
//! 5. **文件清理**：全部写入成功后删除源文档和缓存
//! 6. **统计输出**：记录写入/失败数量

use crate::config::Config;
use crate::error::{AppResult, GenerationError};
use crate::infrastructure::ResponseCache;
use crate::models::{load_source_document, ModuleRecord, SourceDocument, Templates};
use crate::services::content_splitter::{heading_matches, heading_title};
use crate::services::{split_module_contents, ContentGenerator};
use crate::utils::logging::truncate_text;
use crate::workflow::{ModuleCtx, ModuleFlow};
use futures::stream::{self, StreamExt};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, error, info, warn};

/// 单篇文档的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// 全部模块写入成功
    Completed { written: usize },
    /// 文档中没有模块
    Skipped,
    /// 部分模块失败，源文档和缓存保留以便重跑
    Partial { written: usize, failed: usize },
}

/// 单个文档处理器
pub struct DocumentProcessor {
    generator: Arc<dyn ContentGenerator>,
    module_flow: ModuleFlow,
    response_file_name: String,
    max_concurrent_writes: usize,
    cleanup_inputs: bool,
}

impl DocumentProcessor {
    pub fn new(
        config: &Config,
        templates: Arc<Templates>,
        generator: Arc<dyn ContentGenerator>,
    ) -> Self {
        Self {
            generator,
            module_flow: ModuleFlow::new(templates),
            response_file_name: config.response_file_name.clone(),
            max_concurrent_writes: config.max_concurrent_writes,
            cleanup_inputs: config.cleanup_inputs,
        }
    }

    /// 处理单篇文档
    ///
    /// # 参数
    /// - `path`: 源文档路径
    /// - `document_index`: 文档索引（用于日志）
    ///
    /// # 返回
    /// 生成失败、格式错误或读取失败时返回 `Err`，此时不会写出任何文件，
    /// 源文档和缓存保持原样
    pub async fn process(&self, path: &Path, document_index: usize) -> AppResult<DocumentOutcome> {
        let document = load_source_document(path).await?;

        if document.is_empty() {
            debug!("[文档 {}] 没有模块，跳过: {}", document_index, path.display());
            return Ok(DocumentOutcome::Skipped);
        }

        log_document_start(document_index, &document);

        let cache = ResponseCache::new(document.folder(), &self.response_file_name);
        let contents = self.load_or_generate(&document, &cache, document_index).await?;

        let destination = document.folder().to_path_buf();
        let modules: Vec<(usize, ModuleRecord, String)> = document
            .modules
            .iter()
            .cloned()
            .zip(contents)
            .enumerate()
            .map(|(idx, (record, generated))| (idx + 1, record, generated))
            .collect();

        let results: Vec<AppResult<_>> = stream::iter(modules)
            .map(|(module_index, record, generated)| {
                let flow = self.module_flow.clone();
                let destination = destination.clone();
                async move {
                    let ctx = ModuleCtx::new(document_index, module_index, &record.title);
                    let result = flow.run(&destination, &record, &generated, &ctx).await;
                    if let Err(e) = &result {
                        error!("{} ❌ 模块处理失败: {}", ctx, e);
                    }
                    result
                }
            })
            .buffer_unordered(self.max_concurrent_writes)
            .collect()
            .await;

        let written = results.iter().filter(|r| r.is_ok()).count();
        let failed = results.len() - written;

        if failed > 0 {
            warn!(
                "[文档 {}] ⚠️ {} 个模块失败，保留源文档和缓存以便重跑",
                document_index, failed
            );
            return Ok(DocumentOutcome::Partial { written, failed });
        }

        if self.cleanup_inputs {
            cleanup_inputs(&document, &cache, document_index).await;
        }

        info!(
            "[文档 {}] ✅ 文档处理完成，写入 {} 个模块",
            document_index, written
        );
        Ok(DocumentOutcome::Completed { written })
    }

    /// 读取缓存并拆分；缓存不存在或与当前文档对不上时调用生成服务，
    /// 生成结果立即写入缓存
    ///
    /// 同一目录下的文档共用一个缓存文件，所以缓存必须逐个模块核对标题
    async fn load_or_generate(
        &self,
        document: &SourceDocument,
        cache: &ResponseCache,
        document_index: usize,
    ) -> AppResult<Vec<String>> {
        let expected = document.modules.len();

        if let Some(cached) = cache.load().await? {
            match split_module_contents(&cached, expected) {
                Ok(contents) if title_mismatch(document, &contents).is_none() => {
                    info!(
                        "[文档 {}] 📦 使用缓存: {}",
                        document_index,
                        cache.path().display()
                    );
                    return Ok(contents);
                }
                _ => warn!(
                    "[文档 {}] ⚠️ 缓存与当前文档的模块对不上，重新生成: {}",
                    document_index,
                    cache.path().display()
                ),
            }
        }

        info!(
            "[文档 {}] 🤖 调用 {} 生成 {} 个模块...",
            document_index,
            self.generator.name(),
            expected
        );

        let response = self.generator.generate(&document.module_titles()).await?;
        cache.store(&response).await?;

        debug!(
            "[文档 {}] 生成结果预览: {}",
            document_index,
            truncate_text(&response, 200)
        );

        let contents = split_module_contents(&response, expected)?;
        if let Some(mismatch) = title_mismatch(document, &contents) {
            return Err(mismatch.into());
        }
        Ok(contents)
    }
}

/// 找出第一个一级标题与请求标题不一致的模块
fn title_mismatch(document: &SourceDocument, contents: &[String]) -> Option<GenerationError> {
    document
        .modules
        .iter()
        .zip(contents)
        .enumerate()
        .find(|(_, (record, content))| !heading_matches(content, &record.title))
        .map(|(idx, (record, content))| GenerationError::TitleMismatch {
            index: idx + 1,
            expected: record.title.clone(),
            found: heading_title(content).map(str::to_string),
        })
}

/// 删除已处理的源文档和缓存（尽力而为，失败只告警）
async fn cleanup_inputs(document: &SourceDocument, cache: &ResponseCache, document_index: usize) {
    info!("[文档 {}] 🗑️ 清理已处理的文件...", document_index);

    let is_markdown = document.path.extension().and_then(|s| s.to_str()) == Some("md");
    if is_markdown && fs::try_exists(&document.path).await.unwrap_or(false) {
        match fs::remove_file(&document.path).await {
            Ok(()) => info!(
                "[文档 {}] ✓ 文件已删除: {}",
                document_index,
                document.file_name()
            ),
            Err(e) => warn!(
                "[文档 {}] ⚠️ 无法删除源文档 {}: {}",
                document_index,
                document.path.display(),
                e
            ),
        }
    }

    if let Err(e) = cache.remove().await {
        warn!("[文档 {}] ⚠️ {}", document_index, e);
    }
}

// ========== 日志辅助函数 ==========

fn log_document_start(document_index: usize, document: &SourceDocument) {
    info!("[文档 {}] 开始处理", document_index);
    info!("[文档 {}] 路径: {}", document_index, document.path.display());
    info!("[文档 {}] 模块总数: {}", document_index, document.modules.len());
}
