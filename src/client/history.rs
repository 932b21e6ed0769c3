use crate::prompts::CLIENT_GREETING;

const ASSISTANT_IDLE_CAPTION: &str = "Listening to your response...";
const CANDIDATE_IDLE_CAPTION: &str = "Waiting for your response...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Assistant,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientHistoryEntry {
    pub role: Speaker,
    pub text: String,
}

/// What the client renders. Tracked independently of the proxy's transcript.
#[derive(Debug, Clone)]
pub struct ClientHistory {
    entries: Vec<ClientHistoryEntry>,
}

impl Default for ClientHistory {
    fn default() -> Self {
        Self::seeded()
    }
}

impl ClientHistory {
    pub fn seeded() -> Self {
        Self {
            entries: vec![ClientHistoryEntry {
                role: Speaker::Assistant,
                text: CLIENT_GREETING.to_string(),
            }],
        }
    }

    pub fn push(&mut self, role: Speaker, text: impl Into<String>) {
        self.entries.push(ClientHistoryEntry {
            role,
            text: text.into(),
        });
    }

    pub fn entries(&self) -> &[ClientHistoryEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&ClientHistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Caption under the interviewer panel.
    pub fn assistant_caption(&self) -> &str {
        match self.last() {
            Some(entry) if entry.role == Speaker::Assistant => entry.text.as_str(),
            _ => ASSISTANT_IDLE_CAPTION,
        }
    }

    /// Caption under the candidate panel.
    pub fn candidate_caption(&self) -> &str {
        match self.last() {
            Some(entry) if entry.role == Speaker::User => entry.text.as_str(),
            _ => CANDIDATE_IDLE_CAPTION,
        }
    }
}
