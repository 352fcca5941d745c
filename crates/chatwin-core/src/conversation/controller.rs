//! Conversation controller

use super::reply::Reply;
use crate::config::BudgetConfig;
use crate::context::{CompactionEngine, CompactionStats, PromptAssembler, TokenEstimator};
use crate::error::{ChatError, ChatResult};
use crate::llm::{Responder, StreamOptions, Summarizer};
use crate::session::{ChatSession, SessionStore};
use crate::types::{Turn, has_valid_summary_position};
use futures::StreamExt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Drives a single conversation through compaction, prompting and streaming
///
/// Calls are sequential: `send_message` borrows the controller mutably, so a
/// second message cannot start before the first one finishes.
pub struct ConversationController {
    config: BudgetConfig,
    engine: CompactionEngine,
    assembler: PromptAssembler,
    responder: Arc<dyn Responder>,
    turns: Vec<Turn>,
    store: Option<Arc<dyn SessionStore>>,
    session_id: Option<String>,
    stats: CompactionStats,
}

impl ConversationController {
    /// Create a controller with an empty conversation
    ///
    /// Fails when `config` violates a budget invariant.
    pub fn new(
        config: BudgetConfig,
        summarizer: Arc<dyn Summarizer>,
        responder: Arc<dyn Responder>,
    ) -> ChatResult<Self> {
        config.validate()?;
        Ok(Self {
            engine: CompactionEngine::new(config.clone(), summarizer),
            assembler: PromptAssembler::new(config.effective_budget()),
            config,
            responder,
            turns: Vec::new(),
            store: None,
            session_id: None,
            stats: CompactionStats::default(),
        })
    }

    pub fn config(&self) -> &BudgetConfig {
        &self.config
    }

    /// Totals across every compaction pass run by this controller
    pub fn stats(&self) -> &CompactionStats {
        &self.stats
    }

    /// Current conversation, summary first when present
    pub fn history(&self) -> &[Turn] {
        &self.turns
    }

    /// Estimated tokens of the current conversation
    pub fn history_tokens(&self) -> usize {
        TokenEstimator::estimate_turns(&self.turns)
    }

    pub fn clear_history(&mut self) {
        self.turns.clear();
    }

    pub fn set_session_store(&mut self, store: Arc<dyn SessionStore>) {
        self.store = Some(store);
    }

    pub fn current_session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Start an empty conversation, in a new session when a store is set
    pub async fn start_new_session(&mut self, context_file: Option<String>) -> ChatResult<()> {
        if let Some(store) = &self.store {
            let session = store.create_session(context_file).await?;
            debug!(session_id = %session.id, "Started new session");
            self.session_id = Some(session.id);
        }
        self.turns.clear();
        Ok(())
    }

    /// Switch to a stored session and load its conversation
    ///
    /// Without a store this does nothing.
    pub async fn load_session(&mut self, id: &str) -> ChatResult<()> {
        let Some(store) = &self.store else {
            return Ok(());
        };
        let session = store
            .switch_session(id)
            .await?
            .ok_or_else(|| ChatError::not_found(format!("session {}", id), "session"))?;

        self.adopt(session);
        Ok(())
    }

    /// Load the store's active session, creating one if there is none
    pub async fn load_active_session(&mut self) -> ChatResult<()> {
        let Some(store) = &self.store else {
            return Ok(());
        };
        let session = store.active_session().await?;
        self.adopt(session);
        Ok(())
    }

    fn adopt(&mut self, session: ChatSession) {
        if !has_valid_summary_position(&session.turns) {
            warn!(session_id = %session.id, "Stored session has a summary turn out of place");
        }
        debug!(session_id = %session.id, turns = session.turns.len(), "Loaded session");
        self.session_id = Some(session.id);
        self.turns = session.turns;
    }

    /// Send a user message and stream the reply through `on_chunk`
    ///
    /// `context` is external document text; it is trimmed to whatever budget
    /// the conversation leaves.
    pub async fn send_message<F>(
        &mut self,
        user_message: &str,
        context: &str,
        on_chunk: F,
    ) -> ChatResult<Reply>
    where
        F: FnMut(&str) + Send,
    {
        self.send_message_with(user_message, context, StreamOptions::default(), on_chunk)
            .await
    }

    /// [`send_message`](Self::send_message) with explicit stream options
    ///
    /// When the cancellation token fires, streaming stops and the text
    /// received so far is kept as the assistant turn. A blank message is
    /// rejected before anything is recorded.
    pub async fn send_message_with<F>(
        &mut self,
        user_message: &str,
        context: &str,
        mut options: StreamOptions,
        mut on_chunk: F,
    ) -> ChatResult<Reply>
    where
        F: FnMut(&str) + Send,
    {
        if user_message.trim().is_empty() {
            return Err(ChatError::invalid_field(
                "message must not be empty",
                "user_message",
            ));
        }
        self.turns.push(Turn::user(user_message));

        let compaction = self.engine.compact(&self.turns, context).await;
        self.turns = compaction.turns.clone();
        self.stats.record(&compaction);

        let assembled = self.assembler.build(&self.turns, user_message, context);
        debug!(
            history_turns = self.turns.len(),
            messages_tokens = assembled.messages_tokens,
            context_chars = assembled.context_chars,
            context_truncated = assembled.context_truncated,
            "Assembled prompt"
        );

        if options.model.is_none() {
            options.model = self.config.model.clone();
        }
        let (text, cancelled) = self
            .stream_reply(&assembled.text, &options, &mut on_chunk)
            .await?;

        let reply = Reply {
            text,
            cancelled,
            compaction,
        };
        if reply.committed() {
            self.turns.push(Turn::assistant(reply.text.clone()));
        } else {
            debug!("Cancelled before any text arrived");
        }

        self.persist().await;
        Ok(reply)
    }

    /// Stream the reply, returning the text and whether it was cut short
    ///
    /// A responder that reports [`ChatError::Cancelled`] is treated the same
    /// as the token firing.
    async fn stream_reply<F>(
        &self,
        prompt: &str,
        options: &StreamOptions,
        on_chunk: &mut F,
    ) -> ChatResult<(String, bool)>
    where
        F: FnMut(&str) + Send,
    {
        let mut text = String::new();
        if options.is_cancelled() {
            debug!("Cancelled before the responder was called");
            return Ok((text, true));
        }
        let cancel = options.cancel.clone().unwrap_or_default();

        let started = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ChatError::Cancelled),
            result = self.responder.stream(prompt, options) => result,
        };
        let mut stream = match started {
            Ok(stream) => stream,
            Err(ChatError::Cancelled) => return Ok((text, true)),
            Err(e) => {
                warn!(error = %e, retryable = e.is_retryable(), "Responder failed to start");
                return Err(e);
            }
        };

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Ok((text, true)),
                chunk = stream.next() => match chunk {
                    Some(Ok(chunk)) => {
                        on_chunk(&chunk);
                        text.push_str(&chunk);
                    }
                    Some(Err(ChatError::Cancelled)) => return Ok((text, true)),
                    Some(Err(e)) => {
                        warn!(error = %e, retryable = e.is_retryable(), "Response stream failed");
                        return Err(e);
                    }
                    None => return Ok((text, false)),
                },
            }
        }
    }

    /// Push the conversation to the store; failures are only logged
    async fn persist(&self) {
        let (Some(store), Some(id)) = (&self.store, &self.session_id) else {
            return;
        };
        if let Err(e) = store.update_session(id, &self.turns).await {
            warn!(session_id = %id, error = %e, "Failed to persist conversation");
        }
    }
}
