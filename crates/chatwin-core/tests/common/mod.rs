//! Deterministic LLM stand-ins shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chatwin_core::{
    BudgetConfig, ChatError, ChatResult, ConversationController, GenerateOptions, Responder,
    StreamOptions, Summarizer, TextStream,
};
use futures::stream;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const STUB_RESPONSE: &str = "Test response from stub adapter.";

/// Summarizer that counts calls and can be switched to fail
#[derive(Default)]
pub struct CountingSummarizer {
    calls: AtomicUsize,
    fail: AtomicBool,
}

impl CountingSummarizer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        let summarizer = Self::default();
        summarizer.fail.store(true, Ordering::SeqCst);
        Arc::new(summarizer)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Summarizer for CountingSummarizer {
    async fn generate(&self, _prompt: &str, _options: &GenerateOptions) -> ChatResult<String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail.load(Ordering::SeqCst) {
            return Err(ChatError::llm("summarizer unavailable"));
        }
        Ok(format!("SUMMARIZED: Summary of conversation (call {})", n))
    }
}

/// Responder that streams a fixed reply in five-character chunks
#[derive(Default)]
pub struct ChunkingResponder {
    prompts: Mutex<Vec<String>>,
}

impl ChunkingResponder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> String {
        self.prompts().pop().unwrap_or_default()
    }
}

#[async_trait]
impl Responder for ChunkingResponder {
    async fn stream(&self, prompt: &str, _options: &StreamOptions) -> ChatResult<TextStream> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let chunks: Vec<ChatResult<String>> = STUB_RESPONSE
            .chars()
            .collect::<Vec<_>>()
            .chunks(5)
            .map(|c| Ok(c.iter().collect()))
            .collect();
        Ok(Box::pin(stream::iter(chunks)))
    }
}

pub fn budget(max: usize, reserved: usize, recent: usize, min: usize) -> BudgetConfig {
    BudgetConfig::default()
        .with_max_prompt_tokens(max)
        .with_reserved_response_tokens(reserved)
        .with_recent_messages_to_keep(recent)
        .with_min_recent_messages_to_keep(min)
}

pub fn controller(
    config: BudgetConfig,
    summarizer: Arc<CountingSummarizer>,
    responder: Arc<ChunkingResponder>,
) -> ConversationController {
    ConversationController::new(config, summarizer, responder).unwrap()
}

/// Install a test subscriber honouring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
