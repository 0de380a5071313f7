use serde::{Deserialize, Serialize};

/// Who produced a turn in the conversation.
///
/// Serializes to the role strings the Gemini API expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One message in a conversation exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Turn {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Turn {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Ordered, append-only sequence of turns forming the model's context.
pub type ConversationHistory = Vec<Turn>;
