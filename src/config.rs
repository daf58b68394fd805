use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 默认配置文件名（位于当前工作目录）
pub const DEFAULT_CONFIG_FILE: &str = "module_splitter.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 同时处理的文档数量
    pub max_concurrent_documents: usize,
    /// 单个文档内同时写入的模块文件数量
    pub max_concurrent_writes: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 全部模块写入成功后是否删除源文档和缓存文件
    pub cleanup_inputs: bool,
    /// 缓存生成结果的文件名（与源文档同目录）
    pub response_file_name: String,
    /// 扫描时排除的目录名
    pub excluded_folders: Vec<String>,
    // --- 模板配置 ---
    pub content_template_path: PathBuf,
    pub footer_template_path: PathBuf,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_documents: 8,
            max_concurrent_writes: 16,
            verbose_logging: false,
            cleanup_inputs: true,
            response_file_name: "response.md".to_string(),
            excluded_folders: [
                "project",
                "projects",
                "assignment",
                "assignments",
                "upgrade-notice",
                "course-completion",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            content_template_path: PathBuf::from("templates/content_template.md"),
            footer_template_path: PathBuf::from("templates/markdown_constant.txt"),
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-2.0-flash".to_string(),
            llm_temperature: 0.3,
            llm_max_tokens: 8192,
        }
    }
}

impl Config {
    /// 加载配置：默认值 → 配置文件（可选）→ 环境变量
    ///
    /// `path` 为空时依次尝试 `MODULE_SPLITTER_CONFIG` 和当前目录下的
    /// [`DEFAULT_CONFIG_FILE`]，都不存在则只使用默认值。
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("MODULE_SPLITTER_CONFIG").ok().map(PathBuf::from));

        let base = match explicit {
            Some(path) => Self::from_file(&path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        let config = base.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件读取配置，缺省字段使用默认值
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content).map_err(|message| {
            ConfigError::ParseFailed {
                path: path.to_path_buf(),
                message,
            }
            .into()
        })
    }

    fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// 仅使用默认值和环境变量
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 环境变量覆盖已有取值
    fn with_env_overrides(self) -> Self {
        let base = self;
        Self {
            max_concurrent_documents: env_parse("MAX_CONCURRENT_DOCUMENTS")
                .unwrap_or(base.max_concurrent_documents),
            max_concurrent_writes: env_parse("MAX_CONCURRENT_WRITES")
                .unwrap_or(base.max_concurrent_writes),
            verbose_logging: env_parse("VERBOSE_LOGGING").unwrap_or(base.verbose_logging),
            cleanup_inputs: env_parse("CLEANUP_INPUTS").unwrap_or(base.cleanup_inputs),
            response_file_name: std::env::var("RESPONSE_FILE_NAME")
                .unwrap_or(base.response_file_name),
            excluded_folders: base.excluded_folders,
            content_template_path: std::env::var("CONTENT_TEMPLATE_PATH")
                .map(PathBuf::from)
                .unwrap_or(base.content_template_path),
            footer_template_path: std::env::var("FOOTER_TEMPLATE_PATH")
                .map(PathBuf::from)
                .unwrap_or(base.footer_template_path),
            llm_api_key: std::env::var("LLM_API_KEY")
                .or_else(|_| std::env::var("GEMINI_API_KEY"))
                .unwrap_or(base.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(base.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(base.llm_model_name),
            llm_temperature: base.llm_temperature,
            llm_max_tokens: base.llm_max_tokens,
        }
    }

    /// 校验配置项
    pub fn validate(&self) -> AppResult<()> {
        if self.max_concurrent_documents == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_concurrent_documents",
                value: "0".to_string(),
            }
            .into());
        }
        if self.max_concurrent_writes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_concurrent_writes",
                value: "0".to_string(),
            }
            .into());
        }
        if self.response_file_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "response_file_name",
                value: self.response_file_name.clone(),
            }
            .into());
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
