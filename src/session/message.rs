use chrono::{DateTime, Local};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

/// Media carried by a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment {
    Image { mime_type: String, data: String },
}

/// What a model-authored message represents, so the display can tell
/// real answers apart from synthetic turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Turn,
    Divider,
    Fallback,
}

/// A single entry in the conversation log. Never mutated once created.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub kind: MessageKind,
    pub text: String,
    pub timestamp: DateTime<Local>,
    pub attachment: Option<Attachment>,
}

impl Message {
    fn build(role: Role, kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            kind,
            text: text.into(),
            timestamp: Local::now(),
            attachment: None,
        }
    }

    pub fn user(text: impl Into<String>, attachment: Option<Attachment>) -> Self {
        Self {
            attachment,
            ..Self::build(Role::User, MessageKind::Turn, text)
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::build(Role::Model, MessageKind::Turn, text)
    }

    pub fn fallback(text: impl Into<String>) -> Self {
        Self::build(Role::Model, MessageKind::Fallback, text)
    }

    pub fn divider(text: impl Into<String>) -> Self {
        Self::build(Role::Model, MessageKind::Divider, text)
    }

    pub fn has_image(&self) -> bool {
        matches!(self.attachment, Some(Attachment::Image { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = Message::model("a");
        let b = Message::model("a");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn constructors_set_role_and_kind() {
        let image = Attachment::Image {
            mime_type: "image/png".to_string(),
            data: "AAAA".to_string(),
        };
        let user = Message::user("cek", Some(image));
        assert_eq!(user.role, Role::User);
        assert!(user.has_image());

        assert_eq!(Message::divider("x").kind, MessageKind::Divider);
        assert_eq!(Message::fallback("x").kind, MessageKind::Fallback);
        assert!(!Message::model("x").has_image());
    }
}
