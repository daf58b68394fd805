//! 模块提取服务 - 业务能力层
//!
//! 只负责"从一篇文档中找出模块"能力，不读写文件

use crate::models::ModuleRecord;

/// 模块标题标记
pub const MODULE_HEADING: &str = "## Module";

/// 二级标题前缀
const HEADING_PREFIX: &str = "##";

/// 单行的分类结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// 模块标题，携带解析出的标题
    ModuleStart(&'a str),
    /// 其他 `##` 标题
    OtherHeading,
    /// 普通正文
    Body,
}

/// 行分类器
///
/// 匹配规则与状态机分离，替换规则时不需要改动 [`extract_modules`]
pub trait LineClassifier {
    fn classify<'a>(&self, line: &'a str) -> LineKind<'a>;
}

/// 默认规则：包含 `## Module` 的行是模块标题，以 `##` 开头的其他行是普通标题
#[derive(Debug, Default, Clone, Copy)]
pub struct ModuleHeadingClassifier;

impl LineClassifier for ModuleHeadingClassifier {
    fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        let stripped = line.trim();

        if stripped.contains(MODULE_HEADING) {
            LineKind::ModuleStart(module_title(stripped))
        } else if stripped.starts_with(HEADING_PREFIX) {
            LineKind::OtherHeading
        } else {
            LineKind::Body
        }
    }
}

/// 取第一个 `:` 之后的文字；没有冒号或冒号后为空时退回到去掉 `#` 的标题文字
fn module_title(heading: &str) -> &str {
    let after_colon = heading
        .split_once(':')
        .map(|(_, rest)| rest.trim())
        .unwrap_or_default();

    if after_colon.is_empty() {
        heading.trim_start_matches('#').trim()
    } else {
        after_colon
    }
}

/// 使用默认规则提取模块
pub fn extract_modules(text: &str) -> Vec<ModuleRecord> {
    extract_modules_with(&ModuleHeadingClassifier, text)
}

/// 按行扫描文档，返回按文档顺序排列的模块
pub fn extract_modules_with<C: LineClassifier>(classifier: &C, text: &str) -> Vec<ModuleRecord> {
    let mut modules = Vec::new();
    let mut current: Option<&str> = None;
    let mut resources: Vec<&str> = Vec::new();

    for line in text.lines() {
        match classifier.classify(line) {
            LineKind::ModuleStart(title) => {
                if let Some(open) = current.take() {
                    modules.push(finish(open, &resources));
                }
                current = Some(title);
                resources.clear();
            }
            LineKind::OtherHeading => {
                if let Some(open) = current.take() {
                    modules.push(finish(open, &resources));
                    resources.clear();
                }
            }
            LineKind::Body => {
                if current.is_some() {
                    resources.push(line.trim_end());
                }
            }
        }
    }

    if let Some(open) = current {
        modules.push(finish(open, &resources));
    }

    modules
}

fn finish(title: &str, resources: &[&str]) -> ModuleRecord {
    ModuleRecord::new(title, resources.join("\n").trim())
}
