//! 模块处理流程 - 流程层
//!
//! 核心职责：定义"一个模块"从生成内容到输出文件的完整流程
//!
//! 流程顺序：
//! 1. 校验一级标题（只告警）
//! 2. 截断代码块结束标记之后的内容
//! 3. 插入资源小节（资源里的代码块原样保留）
//! 4. 追加固定页脚
//! 5. 写入 `{序号}-{slug}.md`

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{AppResult, ModuleError};
use crate::models::{ModuleRecord, Templates};
use crate::services::content_splitter::heading_title;
use crate::services::reassembly::{inject_resources, truncate_after_fence, EXPECTED_MARKER};
use crate::services::{module_file_name, write_module_file};
use crate::workflow::module_ctx::ModuleCtx;

/// 组装完成、等待写入的模块文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleOutput {
    pub path: PathBuf,
    pub content: String,
}

/// 模块处理流程
///
/// - 不调用生成服务
/// - 不关心同一文档中的其他模块
/// - 只依赖只读模板
#[derive(Clone)]
pub struct ModuleFlow {
    templates: Arc<Templates>,
}

impl ModuleFlow {
    pub fn new(templates: Arc<Templates>) -> Self {
        Self { templates }
    }

    /// 组装单个模块的最终内容和输出路径（纯计算）
    pub fn assemble(
        &self,
        destination: &Path,
        record: &ModuleRecord,
        generated: &str,
        ctx: &ModuleCtx,
    ) -> AppResult<ModuleOutput> {
        match heading_title(generated) {
            Some(heading) if heading == record.title => {}
            heading => warn!(
                "{} ⚠️ 生成内容的一级标题与请求不一致: {:?}",
                ctx, heading
            ),
        }

        let body = truncate_after_fence(generated);
        let mut content = inject_resources(body, &record.resource).ok_or_else(|| {
            ModuleError::MarkerMissing {
                index: ctx.module_index,
                title: record.title.clone(),
                marker: EXPECTED_MARKER,
            }
        })?;
        content.push_str(&self.templates.footer);

        Ok(ModuleOutput {
            path: destination.join(module_file_name(ctx.module_index, &record.title)),
            content,
        })
    }

    /// 组装并写入，返回输出路径
    pub async fn run(
        &self,
        destination: &Path,
        record: &ModuleRecord,
        generated: &str,
        ctx: &ModuleCtx,
    ) -> AppResult<PathBuf> {
        let output = self.assemble(destination, record, generated, ctx)?;
        write_module_file(&output.path, &output.content).await?;

        info!("{} ✅ 已完成: {}", ctx, output.path.display());
        Ok(output.path)
    }
}
