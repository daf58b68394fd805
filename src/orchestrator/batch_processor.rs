//! 批量文档处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量文档的调度和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：加载只读模板、创建生成服务
//! 2. **批量扫描**：找出根目录下所有待处理的 Markdown 文档
//! 3. **并发控制**：使用 Semaphore 限制同时处理的目录数量，
//!    同一目录下的文档共用 `response.md`，按顺序处理
//! 4. **错误隔离**：单篇文档失败不影响其他文档
//! 5. **全局统计**：汇总所有文档的处理结果

use crate::config::Config;
use crate::models::{discover_markdown_files, Templates};
use crate::orchestrator::document_processor::{DocumentOutcome, DocumentProcessor};
use crate::services::{ContentGenerator, LlmService};
use crate::utils::logging;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    processor: Arc<DocumentProcessor>,
}

impl App {
    /// 初始化应用：模板只在这里读取一次
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config);

        let templates = Arc::new(
            Templates::load(&config)
                .await
                .context("加载模板失败")?,
        );

        if config.llm_api_key.is_empty() {
            warn!("⚠️ 未设置 LLM_API_KEY / GEMINI_API_KEY，只有已缓存的文档能处理成功");
        }

        let generator: Arc<dyn ContentGenerator> =
            Arc::new(LlmService::new(&config, templates.clone()));

        Ok(Self::with_generator(config, templates, generator))
    }

    /// 使用指定的生成服务创建应用
    pub fn with_generator(
        config: Config,
        templates: Arc<Templates>,
        generator: Arc<dyn ContentGenerator>,
    ) -> Self {
        let processor = Arc::new(DocumentProcessor::new(&config, templates, generator));
        Self { config, processor }
    }

    /// 运行应用主逻辑
    pub async fn run(&self, root: &Path) -> Result<RunStats> {
        info!("\n📁 正在扫描待处理的文档: {}", root.display());

        let documents = discover_markdown_files(
            root,
            &self.config.excluded_folders,
            &self.config.response_file_name,
        )
        .await
        .with_context(|| format!("无法扫描目录: {}", root.display()))?;

        if documents.is_empty() {
            warn!("⚠️ 没有找到待处理的 Markdown 文件，程序结束");
            return Ok(RunStats::default());
        }

        logging::log_documents_found(documents.len(), self.config.max_concurrent_documents);

        let stats = self.process_all_documents(documents).await?;

        logging::print_final_stats(&stats);

        Ok(stats)
    }

    /// 并发处理所有文档
    ///
    /// 每个目录一个任务，任务内逐篇处理；同时运行的任务数量受 Semaphore 限制
    async fn process_all_documents(&self, documents: Vec<PathBuf>) -> Result<RunStats> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_documents));
        let mut stats = RunStats {
            documents: documents.len(),
            ..Default::default()
        };

        let mut handles = Vec::new();
        for (folder, group) in group_by_folder(documents) {
            let permit = semaphore.clone().acquire_owned().await?;
            let processor = self.processor.clone();
            let group_size = group.len();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                let mut outcomes = Vec::with_capacity(group.len());
                for (document_index, path) in group {
                    let outcome = processor.process(&path, document_index).await;
                    outcomes.push((document_index, path, outcome));
                }
                outcomes
            });
            handles.push((folder, group_size, handle));
        }

        for (folder, group_size, handle) in handles {
            let outcomes = match handle.await {
                Ok(outcomes) => outcomes,
                Err(e) => {
                    error!("[目录 {}] 任务执行失败: {}", folder.display(), e);
                    stats.failed += group_size;
                    continue;
                }
            };

            for (document_index, path, outcome) in outcomes {
                match outcome {
                    Ok(outcome) => stats.record(outcome),
                    Err(e) => {
                        error!(
                            "[文档 {}] ❌ 处理失败 ({}): {}",
                            document_index,
                            path.display(),
                            e
                        );
                        stats.failed += 1;
                    }
                }
            }
        }

        Ok(stats)
    }
}

/// 按所在目录分组，保留文档编号（从1开始）
fn group_by_folder(documents: Vec<PathBuf>) -> BTreeMap<PathBuf, Vec<(usize, PathBuf)>> {
    let mut groups: BTreeMap<PathBuf, Vec<(usize, PathBuf)>> = BTreeMap::new();
    for (idx, path) in documents.into_iter().enumerate() {
        let folder = path.parent().map(Path::to_path_buf).unwrap_or_default();
        groups.entry(folder).or_default().push((idx + 1, path));
    }
    groups
}

/// 处理统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    /// 扫描到的文档数量
    pub documents: usize,
    pub completed: usize,
    pub skipped: usize,
    /// 出错或部分模块失败的文档数量
    pub failed: usize,
    pub modules_written: usize,
}

impl RunStats {
    /// 没有失败的文档
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    fn record(&mut self, outcome: DocumentOutcome) {
        match outcome {
            DocumentOutcome::Completed { written } => {
                self.completed += 1;
                self.modules_written += written;
            }
            DocumentOutcome::Skipped => self.skipped += 1,
            DocumentOutcome::Partial { written, .. } => {
                self.failed += 1;
                self.modules_written += written;
            }
        }
    }
}
