//! Budget configuration
//!
//! [`BudgetConfig`] carries the four numbers that drive every budget
//! decision, plus the options passed to the summarizer. It can be built in
//! code, loaded from a TOML/YAML/JSON file, and overridden from `CHATWIN_*`
//! environment variables.

mod budget;
mod loader;

pub use budget::{
    BudgetConfig, DEFAULT_MAX_PROMPT_TOKENS, DEFAULT_MIN_RECENT_MESSAGES_TO_KEEP,
    DEFAULT_RECENT_MESSAGES_TO_KEEP, DEFAULT_RESERVED_RESPONSE_TOKENS, DEFAULT_SUMMARY_TEMPERATURE,
};
pub use loader::{ENV_PREFIX, load_from_file};
