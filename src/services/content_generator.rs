//! 内容生成能力
//!
//! `ContentGenerator` 是流程层唯一依赖的生成接口，生产环境由
//! [`LlmService`](crate::services::LlmService) 实现，测试中可以替换成固定输出

use crate::error::AppResult;
use async_trait::async_trait;

/// 根据一篇文档的全部模块标题，一次性生成所有模块的内容
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// 返回去掉首尾空白的原始生成文本
    async fn generate(&self, titles: &[String]) -> AppResult<String>;

    /// 生成器名称（用于日志）
    fn name(&self) -> &str;
}

/// 构建批量生成提示词
///
/// 包含：标题列表、示例格式、格式要求
pub fn build_module_prompt(titles: &[String], content_template: &str) -> String {
    let title_list = titles
        .iter()
        .map(|title| format!("- {title}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are an experienced technical writer. Write markdown content for every module title listed below, following the example format.

Requirements for every module:
- Put each module in its own fenced block that opens with ```markdown and closes with ```
- The first line of each block is a level-1 heading (`# `) exactly equal to the module title
- Use these sections, in this order: Prerequisite, Time Estimate, Instruction, Expected Learning Outcome
- The Instruction section is one sentence introducing the module
- Use `-` for every bullet point, never `*`
- Emit the modules in the same order as the list
- Do not write anything outside the fenced blocks

### Module Titles
{title_list}

### Example Format
```markdown
{content_template}
```
"#
    )
}
