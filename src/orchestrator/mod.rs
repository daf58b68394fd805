//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量文档处理器
//! - 管理应用生命周期（初始化、运行）
//! - 扫描源文档（Vec<PathBuf>）
//! - 控制并发数量（Semaphore）
//! - 输出全局统计信息
//!
//! ### `document_processor` - 单个文档处理器
//! - 提取模块、读取缓存或调用生成服务
//! - 拆分生成结果并校验数量
//! - 并发写入所有模块（ModuleFlow）
//! - 清理源文档和缓存
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<PathBuf>)
//!     ↓
//! document_processor (处理 Vec<ModuleRecord>)
//!     ↓
//! workflow::ModuleFlow (处理单个模块)
//!     ↓
//! services (能力层：extract / generate / split / reassemble / write)
//!     ↓
//! infrastructure (基础设施：ResponseCache)
//! ```

pub mod batch_processor;
pub mod document_processor;

pub use batch_processor::{App, RunStats};
pub use document_processor::{DocumentOutcome, DocumentProcessor};
