//! Outcome of one inference exchange and the user-facing strings for each failure class.

/// Remote answered with a non-success HTTP status.
pub const MSG_BAD_STATUS: &str = "Sorry, I'm having trouble connecting. Please try again.";
/// Body parsed but carried no text.
pub const MSG_EMPTY: &str =
    "I received your message but couldn't generate a response. Please try again.";
pub const MSG_TIMEOUT: &str = "The AI is taking too long to respond. Please try again.";
pub const MSG_CONNECTION: &str = "Connection error. Please check your internet connection.";
pub const MSG_UNEXPECTED: &str = "An unexpected error occurred. Please try again later.";

/// Why an exchange produced no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    Connection,
    Status(u16),
    Empty,
    Other,
}

impl FailureKind {
    pub fn message(&self) -> &'static str {
        match self {
            FailureKind::Timeout => MSG_TIMEOUT,
            FailureKind::Connection => MSG_CONNECTION,
            FailureKind::Status(_) => MSG_BAD_STATUS,
            FailureKind::Empty => MSG_EMPTY,
            FailureKind::Other => MSG_UNEXPECTED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Non-empty, trimmed assistant text.
    Answer(String),
    Fallback(FailureKind),
}

impl Completion {
    /// Text to show the user; never empty.
    pub fn text(&self) -> &str {
        match self {
            Completion::Answer(text) => text,
            Completion::Fallback(kind) => kind.message(),
        }
    }

    pub fn is_answer(&self) -> bool {
        matches!(self, Completion::Answer(_))
    }
}
