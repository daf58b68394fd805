use anyhow::{bail, Result};
use clap::Parser;
use course_module_splitter::utils::logging;
use course_module_splitter::{App, Config};
use std::path::PathBuf;

/// 为 Markdown 文档中的每个模块生成独立文件
#[derive(Parser, Debug)]
#[command(name = "course_module_splitter", version, about)]
struct Cli {
    /// 要扫描的根目录（默认：当前目录）
    path: Option<PathBuf>,

    /// 配置文件路径（默认：./module_splitter.toml，存在时才读取）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,

    /// 处理完成后保留源文档和 response.md
    #[arg(long)]
    keep_inputs: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let mut config = Config::load(cli.config.as_deref())?;
    config.verbose_logging |= cli.verbose;
    if cli.keep_inputs {
        config.cleanup_inputs = false;
    }

    // 初始化日志
    logging::init(config.verbose_logging);

    let root = match cli.path {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    if !root.is_dir() {
        bail!("No such directory: {}", root.display());
    }

    // 初始化并运行应用
    let stats = App::initialize(config).await?.run(&root).await?;
    if !stats.is_success() {
        bail!("{} 个文档处理失败，源文档和 response.md 已保留，可直接重跑", stats.failed);
    }

    Ok(())
}
