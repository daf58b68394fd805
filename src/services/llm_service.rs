//! LLM 服务 - 业务能力层
//!
//! 只负责"批量生成模块内容"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Gemini 的 OpenAI 兼容端点）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, GenerationError};
use crate::models::Templates;
use crate::services::content_generator::{build_module_prompt, ContentGenerator};

/// LLM 服务
///
/// 职责：
/// - 根据模块标题构建提示词
/// - 单次调用 LLM API，不重试、不流式
/// - 不解析返回内容
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: f32,
    max_tokens: u32,
    templates: Arc<Templates>,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config, templates: Arc<Templates>) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
            temperature: config.llm_temperature,
            max_tokens: config.llm_max_tokens,
            templates,
        }
    }

    /// 发送单条用户消息，返回去掉首尾空白的响应
    pub async fn send_to_llm(&self, user_message: &str) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(|e| AppError::llm_api_failed(&self.model_name, e))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| AppError::llm_api_failed(&self.model_name, e))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::llm_api_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| GenerationError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        Ok(content.trim().to_string())
    }
}

#[async_trait]
impl ContentGenerator for LlmService {
    async fn generate(&self, titles: &[String]) -> AppResult<String> {
        let prompt = build_module_prompt(titles, &self.templates.content_template);
        self.send_to_llm(&prompt).await
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}
