mod message;

use crate::agents::AgentMode;
pub use message::{Attachment, Message, MessageKind, Role};

const WELCOME_TEXT: &str = "**Selamat datang di SIAK-Klinis.**\n\nSaya adalah Koordinator Sistem Rumah Sakit Anda. Silakan pilih modul dengan `/mode` atau ketik kebutuhan Anda di sini untuk saya arahkan.";

/// An encoded image waiting to be sent with the next message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAttachment {
    pub filename: String,
    /// Base64 payload without any `data:` prefix.
    pub data: String,
}

impl PendingAttachment {
    /// Size of the decoded image in bytes, estimated from the base64 length.
    pub fn approx_size(&self) -> usize {
        let padding = self.data.chars().rev().take_while(|c| *c == '=').count();
        (self.data.len() / 4 * 3).saturating_sub(padding)
    }
}

/// In-memory state of one chat session. Lives as long as the process.
#[derive(Debug, Default)]
pub struct Session {
    pub active_mode: AgentMode,
    messages: Vec<Message>,
    pub pending_attachment: Option<PendingAttachment>,
    busy: bool,
}

impl Session {
    pub fn new(mode: AgentMode) -> Self {
        Self {
            active_mode: mode,
            ..Self::default()
        }
    }

    /// A session opened with the coordinator's greeting.
    pub fn with_welcome(mode: AgentMode) -> Self {
        let mut session = Self::new(mode);
        session.push(Message::model(WELCOME_TEXT));
        session
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Appends to the log and returns the stored message.
    pub(crate) fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub(crate) fn clear_messages(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_session_starts_with_one_model_message() {
        let session = Session::with_welcome(AgentMode::Coordinator);
        assert_eq!(session.messages().len(), 1);
        let first = &session.messages()[0];
        assert_eq!(first.role, Role::Model);
        assert!(first.text.contains("SIAK-Klinis"));
        assert!(!session.is_busy());
    }

    #[test]
    fn push_preserves_insertion_order() {
        let mut session = Session::new(AgentMode::Billing);
        session.push(Message::user("satu", None));
        session.push(Message::model("dua"));
        let texts: Vec<_> = session.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["satu", "dua"]);
        assert_eq!(session.last_message().map(|m| m.role), Some(Role::Model));
    }

    #[test]
    fn approx_size_accounts_for_padding() {
        let attachment = PendingAttachment {
            filename: "a.png".to_string(),
            data: "aGVsbG8=".to_string(),
        };
        assert_eq!(attachment.approx_size(), 5);
    }
}
