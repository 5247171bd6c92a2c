use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Bot,
}

/// One chat log entry. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub author: Author,
    pub text: String,
    pub sent_at: DateTime<Local>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Author::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Author::Bot, text)
    }

    fn new(author: Author, text: impl Into<String>) -> Self {
        Self {
            author,
            text: text.into(),
            sent_at: Local::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.author == Author::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_author_in_lowercase() {
        let json = serde_json::to_value(Message::bot("hi")).unwrap();
        assert_eq!(json["author"], "bot");
        assert_eq!(json["text"], "hi");
        assert!(json["sent_at"].is_string());
    }
}
