//! 生成结果拆分服务 - 业务能力层
//!
//! 把一次批量生成的原始文本拆回每个模块各自的内容

use crate::error::{AppResult, GenerationError};
use regex::Regex;
use std::sync::LazyLock;

/// 模块代码块的开始标记
pub const MODULE_FENCE: &str = "```markdown";

/// 行首的 `*` 列表符号
static STAR_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([ \t]*)\*([ \t])").expect("bullet pattern is valid"));

/// 按代码块拆分生成结果
///
/// 只保留以换行加一级标题开头的片段；片段数量必须等于 `expected`，
/// 否则返回 [`GenerationError::FormatMismatch`]，避免标题和内容错位。
pub fn split_module_contents(raw: &str, expected: usize) -> AppResult<Vec<String>> {
    let contents: Vec<String> = raw
        .split(MODULE_FENCE)
        .filter(|segment| segment.starts_with("\n#"))
        .map(|segment| normalize_bullets(&segment[1..]))
        .collect();

    if contents.len() != expected {
        return Err(GenerationError::FormatMismatch {
            expected,
            found: contents.len(),
        }
        .into());
    }

    Ok(contents)
}

/// 把行首的 `*` 列表符号统一成 `-`
pub fn normalize_bullets(content: &str) -> String {
    STAR_BULLET.replace_all(content, "${1}-${2}").into_owned()
}

/// 读取内容第一行的一级标题
pub fn heading_title(content: &str) -> Option<&str> {
    content
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("# "))
        .map(str::trim)
}

/// 一级标题是否就是请求的标题（忽略大小写、空白和标点）
pub fn heading_matches(content: &str, title: &str) -> bool {
    heading_title(content)
        .map(|heading| title_key(heading) == title_key(title))
        .unwrap_or(false)
}

fn title_key(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
