#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! The language-model seam used by the course generator.

use anyhow::{Context, Result};
use async_openai::{
    Client as OpenAIClient,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
};
use futures::{FutureExt, future::BoxFuture};

use crate::config::ModelSettings;

/// Something that can answer a single chat completion.
pub trait ContentModel: Send + Sync {
    /// Name of the underlying model, for logging.
    fn name(&self) -> &str;

    /// Sends `system` and `prompt` as one conversation and returns the
    /// assistant's reply.
    fn complete<'a>(&'a self, system: &'a str, prompt: &'a str) -> BoxFuture<'a, Result<String>>;
}

/// Chat-completions model reached through `async-openai`.
pub struct OpenAiModel {
    /// Configured client.
    client:   OpenAIClient<OpenAIConfig>,
    /// Model name and sampling parameters.
    settings: ModelSettings,
}

impl OpenAiModel {
    /// Builds a client from `settings`. A custom API base is used when set.
    pub fn new(settings: ModelSettings) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(&settings.api_key);
        if let Some(api_base) = &settings.api_base {
            config = config.with_api_base(api_base);
        }

        Self {
            client: OpenAIClient::with_config(config),
            settings,
        }
    }

    /// Model name and sampling parameters in use.
    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    /// Performs the request behind [`ContentModel::complete`].
    async fn chat(&self, system: &str, prompt: &str) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system)
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.settings.model)
            .messages(messages)
            .temperature(self.settings.temperature)
            .max_completion_tokens(self.settings.max_tokens)
            .build()?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .with_context(|| format!("Chat completion with {} failed", self.settings.model))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .context("Model response contained no message content")
    }
}

impl std::fmt::Debug for OpenAiModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiModel")
            .field("model", &self.settings.model)
            .field("api_base", &self.settings.api_base)
            .finish_non_exhaustive()
    }
}

impl ContentModel for OpenAiModel {
    fn name(&self) -> &str {
        &self.settings.model
    }

    fn complete<'a>(&'a self, system: &'a str, prompt: &'a str) -> BoxFuture<'a, Result<String>> {
        self.chat(system, prompt).boxed()
    }
}
