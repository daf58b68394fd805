//! 标题转文件名

/// 缩写替换表，按顺序做子串替换
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("setting", "set"),
    ("management", "mgt"),
    ("application", "app"),
    ("collecting", "collect"),
    ("installing", "install"),
    ("introduction", "intro"),
];

/// 把模块标题转换成可用作文件名的 slug
///
/// 顺序：小写 → 空格换成 `-` → 去掉 `:` → `/` 和 `\` 换成 `-` → 缩写替换
pub fn slugify(title: &str) -> String {
    let slug = title
        .to_lowercase()
        .replace(' ', "-")
        .replace(':', "")
        .replace(['/', '\\'], "-");

    ABBREVIATIONS
        .iter()
        .fold(slug, |slug, (long, short)| slug.replace(long, short))
}

/// 输出文件名：`{序号}-{slug}.md`，序号从 1 开始
pub fn module_file_name(index: usize, title: &str) -> String {
    format!("{}-{}.md", index, slugify(title))
}
