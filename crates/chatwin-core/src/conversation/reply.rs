//! Result of a single exchange

use crate::context::CompactionReport;

/// What one `send_message` call produced
#[derive(Debug, Clone)]
pub struct Reply {
    /// Full streamed text, or the partial text when cancelled
    pub text: String,
    /// The stream was cut short by the cancellation token
    pub cancelled: bool,
    /// Compaction pass run before the prompt was assembled
    pub compaction: CompactionReport,
}

impl Reply {
    /// Whether an assistant turn was recorded for this reply
    pub fn committed(&self) -> bool {
        !(self.cancelled && self.text.is_empty())
    }
}
