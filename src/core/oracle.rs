// ============================================================================
// LingoSync - 翻译服务
// ============================================================================
//
// 文件: src/core/oracle.rs
// 职责: 翻译服务抽象与 OpenAI 兼容实现
// 边界:
//   - ✅ 翻译服务 trait 定义
//   - ✅ chat completions 请求构建与响应解析
//   - ✅ 翻译服务错误类型
//   - ❌ 不应包含重试、限流与超时策略
//   - ❌ 不应包含文件操作
//
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::config::OracleConfig;

/// 翻译服务错误
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("API key not found in environment variable {0}")]
    MissingApiKey(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("translation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("translation service returned no content")]
    EmptyResponse,

    #[error("translation timed out after {0:?}")]
    Timeout(Duration),
}

/// 单次翻译请求
#[derive(Debug, Clone, Copy)]
pub struct TranslationRequest<'a> {
    /// 待翻译文本
    pub text: &'a str,
    /// 源语言名称
    pub source_language: &'a str,
    /// 目标语言名称
    pub target_language: &'a str,
    /// 风格微调指令
    pub instructions: &'a [String],
}

/// 翻译服务
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn translate(&self, request: TranslationRequest<'_>) -> Result<String, OracleError>;
}

/// chat completions 消息
#[derive(Debug, Clone, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: std::borrow::Cow<'a, str>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI 兼容的翻译服务
#[derive(Debug, Clone)]
pub struct OpenAiOracle {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl OpenAiOracle {
    pub fn new(base_url: &str, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// 从配置创建，API key 从配置指定的环境变量读取
    pub fn from_config(config: &OracleConfig) -> Result<Self, OracleError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| OracleError::MissingApiKey(config.api_key_env.clone()))?;

        Ok(Self::new(&config.base_url, config.model.clone(), api_key))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// 直接发送一个问题，用于连通性检查
    pub async fn ask(&self, question: &str) -> Result<String, OracleError> {
        self.complete(vec![ChatMessage {
            role: "user",
            content: question.into(),
        }])
        .await
    }

    async fn complete(&self, messages: Vec<ChatMessage<'_>>) -> Result<String, OracleError> {
        let body = ChatRequest {
            model: &self.model,
            messages,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(OracleError::EmptyResponse)
    }
}

/// 构建翻译消息：微调指令、语言说明、输出约束，最后是原文
fn build_messages<'a>(request: &TranslationRequest<'a>) -> Vec<ChatMessage<'a>> {
    let mut messages: Vec<ChatMessage<'a>> = request
        .instructions
        .iter()
        .map(|instruction| ChatMessage {
            role: "system",
            content: instruction.as_str().into(),
        })
        .collect();

    messages.push(ChatMessage {
        role: "system",
        content: format!(
            "Translate the user's text from {} to {}.",
            request.source_language, request.target_language
        )
        .into(),
    });
    messages.push(ChatMessage {
        role: "system",
        content: "Reply with the translation only, without any additional content.".into(),
    });
    messages.push(ChatMessage {
        role: "user",
        content: request.text.into(),
    });

    messages
}

#[async_trait]
impl Oracle for OpenAiOracle {
    async fn translate(&self, request: TranslationRequest<'_>) -> Result<String, OracleError> {
        self.complete(build_messages(&request)).await
    }
}
