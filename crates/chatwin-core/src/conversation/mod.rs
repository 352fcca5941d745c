//! Conversation orchestration
//!
//! [`ConversationController`] owns one conversation. Each call to
//! [`ConversationController::send_message`] appends the user turn, compacts
//! the conversation to fit the budget, assembles the prompt, streams the
//! reply and records it.

pub mod controller;
pub mod reply;


pub use controller::ConversationController;
pub use reply::Reply;
