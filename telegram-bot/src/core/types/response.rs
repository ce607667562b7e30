//! Handler chain result type.

/// What a handler decided. `Reply(text)` carries the text the runner delivers to the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Not handled here; the next handler runs.
    Continue,
    /// Handled silently; nothing is sent.
    Stop,
    /// Handled; send this text back to the originating chat.
    Reply(String),
}
