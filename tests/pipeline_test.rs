use async_trait::async_trait;
use course_module_splitter::error::GenerationError;
use course_module_splitter::{App, AppResult, Config, ContentGenerator, RunStats, Templates};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const FOOTER: &str = "\n---\n\nHappy learning!\n";

const COURSE: &str = "# Week 1: Testing

Overview text before any module.

## Module 1: Intro to Testing

- [Testing basics](https://example.com/basics)
- [Unit tests](https://example.com/unit)
- [Mocks](https://example.com/mocks)

## Module 2: Advanced Setup

- [Fixtures](https://example.com/fixtures)
- [CI](https://example.com/ci)

## Next Steps

Continue with week 2.
";

/// 按标题生成固定内容的假生成服务，标题包含 "Broken" 时返回错误
#[derive(Default)]
struct MockGenerator {
    calls: AtomicUsize,
}

impl MockGenerator {
    fn render(title: &str) -> String {
        format!(
            "```markdown\n# {title}\n\n## Prerequisite\n* Basic Rust\n\n## Time Estimate\n- 30 minutes\n\n## Instruction\nThis module covers {title}.\n\n## Expected Learning Outcome\n- Understand {title}\n```"
        )
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentGenerator for MockGenerator {
    async fn generate(&self, titles: &[String]) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if titles.iter().any(|t| t.contains("Broken")) {
            return Err(GenerationError::ApiCallFailed {
                model: "mock".to_string(),
                message: "service unavailable".to_string(),
            }
            .into());
        }

        let blocks: Vec<String> = titles.iter().map(|t| Self::render(t)).collect();
        Ok(blocks.join("\n\n").trim().to_string())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

fn app(generator: Arc<MockGenerator>, cleanup_inputs: bool) -> App {
    let config = Config {
        cleanup_inputs,
        max_concurrent_documents: 2,
        ..Config::default()
    };
    let templates = Arc::new(Templates::new("# Example\n", FOOTER));
    App::with_generator(config, templates, generator)
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[tokio::test]
async fn test_end_to_end_two_modules() {
    let dir = tempfile::tempdir().unwrap();
    let week = dir.path().join("week-1");
    let source = week.join("README.md");
    write(&source, COURSE);

    let generator = Arc::new(MockGenerator::default());
    let stats = app(generator.clone(), true).run(dir.path()).await.unwrap();

    assert_eq!(
        stats,
        RunStats {
            documents: 1,
            completed: 1,
            skipped: 0,
            failed: 0,
            modules_written: 2,
        }
    );
    assert_eq!(generator.calls(), 1);

    let first = fs::read_to_string(week.join("1-intro-to-testing.md")).unwrap();
    let second = fs::read_to_string(week.join("2-advanced-setup.md")).unwrap();

    assert!(first.starts_with("# Intro to Testing\n"));
    assert!(first.contains(
        "## Resources\n\n- [Testing basics](https://example.com/basics)\n- [Unit tests](https://example.com/unit)\n- [Mocks](https://example.com/mocks)\n\n## Expected Learning Outcome"
    ));
    assert!(first.contains("## Prerequisite\n- Basic Rust"));
    assert!(first.ends_with(&format!("- Understand Intro to Testing\n{FOOTER}")));
    assert!(!first.contains("```"));

    assert!(second.find("## Resources").unwrap() < second.find("## Expected").unwrap());
    assert!(second.contains("- [Fixtures](https://example.com/fixtures)\n- [CI](https://example.com/ci)"));
    assert!(second.ends_with(FOOTER));

    // 源文档和缓存已清理，不会生成第三个文件
    assert!(!source.exists());
    assert!(!week.join("response.md").exists());
    assert_eq!(fs::read_dir(&week).unwrap().count(), 2);
}

#[tokio::test]
async fn test_rerun_with_cache_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("course.md");
    write(&source, COURSE);

    let generator = Arc::new(MockGenerator::default());
    let app = app(generator.clone(), false);

    app.run(dir.path()).await.unwrap();
    let first_run = fs::read(dir.path().join("1-intro-to-testing.md")).unwrap();
    let first_run_2 = fs::read(dir.path().join("2-advanced-setup.md")).unwrap();
    assert!(dir.path().join("response.md").exists());

    app.run(dir.path()).await.unwrap();

    // 第二次命中缓存
    assert_eq!(generator.calls(), 1);
    assert_eq!(fs::read(dir.path().join("1-intro-to-testing.md")).unwrap(), first_run);
    assert_eq!(fs::read(dir.path().join("2-advanced-setup.md")).unwrap(), first_run_2);
    assert!(source.exists());
}

#[tokio::test]
async fn test_existing_cache_skips_generation() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("course.md"), "## Module 1: Cached Topic\n- link\n");
    write(
        &dir.path().join("response.md"),
        &MockGenerator::render("Cached Topic"),
    );

    let generator = Arc::new(MockGenerator::default());
    let stats = app(generator.clone(), true).run(dir.path()).await.unwrap();

    assert_eq!(stats.completed, 1);
    assert_eq!(generator.calls(), 0);
    assert!(dir.path().join("1-cached-topic.md").exists());
    assert!(!dir.path().join("response.md").exists());
}

#[tokio::test]
async fn test_failed_document_does_not_affect_siblings() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good/course.md");
    let bad = dir.path().join("bad/course.md");
    write(&good, "## Module 1: Installing Tools\n- [rustup](https://rustup.rs)\n");
    write(&bad, "## Module 1: Broken Topic\n- link\n");

    let generator = Arc::new(MockGenerator::default());
    let stats = app(generator.clone(), true).run(dir.path()).await.unwrap();

    assert_eq!(stats.documents, 2);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.failed, 1);
    assert!(!stats.is_success());

    assert!(dir.path().join("good/1-install-tools.md").exists());
    assert!(!good.exists());

    // 生成失败：源文档保留，没有缓存，没有输出
    assert!(bad.exists());
    assert!(!dir.path().join("bad/response.md").exists());
    assert_eq!(fs::read_dir(dir.path().join("bad")).unwrap().count(), 1);
}

#[tokio::test]
async fn test_stale_cache_is_regenerated() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("course.md");
    write(&source, COURSE);
    // 只有一个代码块，但文档有两个模块
    write(&dir.path().join("response.md"), &MockGenerator::render("Intro to Testing"));

    let generator = Arc::new(MockGenerator::default());
    let stats = app(generator.clone(), true).run(dir.path()).await.unwrap();

    assert_eq!(stats.completed, 1);
    assert_eq!(generator.calls(), 1);
    assert!(dir.path().join("1-intro-to-testing.md").exists());
    assert!(dir.path().join("2-advanced-setup.md").exists());
    assert!(!source.exists());
    assert!(!dir.path().join("response.md").exists());
}

#[tokio::test]
async fn test_documents_sharing_a_folder_keep_their_own_content() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("a.md"), "## Module 1: Alpha Topic\n- a-link\n");
    write(&dir.path().join("b.md"), "## Module 1: Beta Topic\n- b-link\n");
    write(
        &dir.path().join("other/c.md"),
        "## Module 1: Gamma Topic\n- c-link\n",
    );

    let generator = Arc::new(MockGenerator::default());
    let app = app(generator.clone(), false);
    let stats = app.run(dir.path()).await.unwrap();

    assert_eq!(stats.documents, 3);
    assert_eq!(stats.completed, 3);
    assert_eq!(stats.failed, 0);
    assert_eq!(generator.calls(), 3);

    let alpha = fs::read_to_string(dir.path().join("1-alpha-topic.md")).unwrap();
    let beta = fs::read_to_string(dir.path().join("1-beta-topic.md")).unwrap();
    let gamma = fs::read_to_string(dir.path().join("other/1-gamma-topic.md")).unwrap();

    assert!(alpha.starts_with("# Alpha Topic\n"));
    assert!(alpha.contains("- a-link"));
    assert!(!alpha.contains("Beta"));
    assert!(beta.starts_with("# Beta Topic\n"));
    assert!(beta.contains("- b-link"));
    assert!(!beta.contains("Alpha"));
    assert!(gamma.contains("- c-link"));

    // 共用的缓存属于最后处理的 b.md，重跑时 a.md 不会拿到它的内容
    let stats = app.run(dir.path()).await.unwrap();
    assert_eq!(stats.completed, 3);
    assert_eq!(generator.calls(), 5);
    let alpha_rerun = fs::read_to_string(dir.path().join("1-alpha-topic.md")).unwrap();
    assert_eq!(alpha_rerun, alpha);
}

#[tokio::test]
async fn test_excluded_and_moduleless_documents() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("projects/final.md"), COURSE);
    write(&dir.path().join("notes/readme.md"), "# Notes\n## Overview\ntext\n");

    let generator = Arc::new(MockGenerator::default());
    let stats = app(generator.clone(), true).run(dir.path()).await.unwrap();

    assert_eq!(stats.documents, 1);
    assert_eq!(stats.skipped, 1);
    assert_eq!(generator.calls(), 0);
    assert!(dir.path().join("projects/final.md").exists());
    assert!(dir.path().join("notes/readme.md").exists());
}

#[tokio::test]
async fn test_missing_root_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = app(Arc::new(MockGenerator::default()), true)
        .run(&dir.path().join("missing"))
        .await;
    tokio_test::assert_err!(result);
}

#[tokio::test]
async fn test_shipped_templates_load() {
    let templates = Templates::load(&Config::default()).await.unwrap();
    assert!(templates.content_template.contains("## Expected Learning Outcome"));
    assert!(!templates.footer.is_empty());
}
