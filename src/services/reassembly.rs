//! 模块内容重组：插入资源、截断尾部

/// 资源插入位置的标记（Expected Learning Outcome 小节）
pub const EXPECTED_MARKER: &str = "## Expected";

/// 插入的资源小节标题
pub const RESOURCES_HEADING: &str = "## Resources";

/// 代码块分隔符
const FENCE: &str = "```";

/// 在第一个 `## Expected` 之前插入资源小节
///
/// 找不到标记时返回 `None`，调用方据此放弃写入该模块
pub fn inject_resources(content: &str, resource: &str) -> Option<String> {
    let index = content.find(EXPECTED_MARKER)?;
    let (before, after) = content.split_at(index);

    Some(format!(
        "{before}{RESOURCES_HEADING}\n\n{resource}\n\n{after}"
    ))
}

/// 丢弃第一个代码块分隔符（原代码块的结束标记）及其之后的内容
pub fn truncate_after_fence(content: &str) -> &str {
    match content.find(FENCE) {
        Some(index) => &content[..index],
        None => content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERATED: &str = "# Intro\n\n## Prerequisite\n- None\n\n## Instruction\nRead.\n\n## Expected Learning Outcome\n- Tests\n```\n\n";

    #[test]
    fn test_inject_places_resources_before_marker() {
        let injected = inject_resources(GENERATED, "- [Book](https://example.com)").unwrap();

        let resources_at = injected.find(RESOURCES_HEADING).unwrap();
        let expected_at = injected.find(EXPECTED_MARKER).unwrap();
        assert!(resources_at < expected_at);
        assert!(injected.contains(
            "Read.\n\n## Resources\n\n- [Book](https://example.com)\n\n## Expected Learning Outcome"
        ));
    }

    #[test]
    fn test_inject_preserves_other_content() {
        let resource = "- a\n- b";
        let injected = inject_resources(GENERATED, resource).unwrap();
        let section = format!("{RESOURCES_HEADING}\n\n{resource}\n\n");

        assert_eq!(injected.replacen(&section, "", 1), GENERATED);
    }

    #[test]
    fn test_inject_uses_first_marker_only() {
        let content = "# A\n## Expected One\n## Expected Two\n";
        let injected = inject_resources(content, "r").unwrap();
        assert_eq!(
            injected,
            "# A\n## Resources\n\nr\n\n## Expected One\n## Expected Two\n"
        );
    }

    #[test]
    fn test_inject_without_marker_fails() {
        assert_eq!(inject_resources("# A\n## Outcome\n", "r"), None);
    }

    #[test]
    fn test_truncate_drops_closing_fence_and_tail() {
        assert_eq!(
            truncate_after_fence(GENERATED),
            "# Intro\n\n## Prerequisite\n- None\n\n## Instruction\nRead.\n\n## Expected Learning Outcome\n- Tests\n"
        );
    }

    #[test]
    fn test_truncate_without_fence_is_unchanged() {
        assert_eq!(truncate_after_fence("# A\nbody\n"), "# A\nbody\n");
    }
}
