//! # Course Module Splitter
//!
//! 把课程 Markdown 文档中的每个 `## Module` 小节扩写成独立的模块文件
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有磁盘上的 `response.md` 缓存，只暴露读写删能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个能力只处理一件事
//! - `module_extractor` - 从文档中提取模块
//! - `LlmService` - 批量生成模块内容
//! - `content_splitter` / `reassembly` - 拆分、插入资源、截断
//! - `slugifier` / `module_writer` - 文件名和写文件
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个模块"的完整处理流程
//! - `ModuleCtx` - 上下文封装（文档索引 + 模块序号 + 标题）
//! - `ModuleFlow` - 流程编排（inject → truncate → footer → write）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量文档处理器，管理并发和统计
//! - `orchestrator/document_processor` - 单个文档处理器，缓存、拆分、清理
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::ResponseCache;
pub use models::{ModuleRecord, SourceDocument, Templates};
pub use orchestrator::{App, DocumentOutcome, DocumentProcessor, RunStats};
pub use services::{ContentGenerator, LlmService};
pub use workflow::{ModuleCtx, ModuleFlow};
