use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered conversation turns, seeded with one system turn.
///
/// Only grows: nothing is ever removed for the lifetime of the owner.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::system(system_prompt)],
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_a_single_system_turn() {
        let transcript = Transcript::new("be brief");
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.messages()[0], ChatMessage::system("be brief"));
    }

    #[test]
    fn keeps_turns_in_conversation_order() {
        let mut transcript = Transcript::new("sys");
        transcript.push_user("hi");
        transcript.push_assistant("hello");
        transcript.push_user("");

        let roles: Vec<Role> = transcript.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::User, Role::Assistant, Role::User]
        );
        assert_eq!(transcript.last().map(|m| m.content.as_str()), Some(""));
    }

    #[test]
    fn roles_serialize_lowercase() {
        let value = serde_json::to_value(ChatMessage::assistant("ok")).unwrap();
        assert_eq!(value["role"], "assistant");
        let value = serde_json::to_value(ChatMessage::system("sys")).unwrap();
        assert_eq!(value["role"], "system");
    }
}
