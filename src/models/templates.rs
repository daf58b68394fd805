use crate::config::Config;
use crate::error::{AppResult, ConfigError};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// 启动时加载一次的只读模板
#[derive(Debug, Clone)]
pub struct Templates {
    /// 提示词中的示例格式
    pub content_template: String,
    /// 追加到每个模块文件末尾的固定内容
    pub footer: String,
}

impl Templates {
    pub fn new(content_template: impl Into<String>, footer: impl Into<String>) -> Self {
        Self {
            content_template: content_template.into(),
            footer: footer.into(),
        }
    }

    /// 从配置的路径读取两个模板
    pub async fn load(config: &Config) -> AppResult<Self> {
        let content_template = read_template(&config.content_template_path).await?;
        let footer = read_template(&config.footer_template_path).await?;

        debug!(
            "模板加载完成: 示例格式 {} 字符, 页脚 {} 字符",
            content_template.len(),
            footer.len()
        );

        Ok(Self {
            content_template,
            footer,
        })
    }
}

async fn read_template(path: &Path) -> AppResult<String> {
    fs::read_to_string(path).await.map_err(|source| {
        ConfigError::TemplateLoadFailed {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}
