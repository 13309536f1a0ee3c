use serde::{Deserialize, Serialize};

/// Speaker of a single conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One chronological turn of a conversation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    role: Role,
    text: String,
}

impl ConversationTurn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, text)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A leading system turn followed by at most `capacity` of the most recent
/// user/assistant turns, in their original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationWindow {
    turns: Vec<ConversationTurn>,
}

impl ConversationWindow {
    /// Number of history turns kept when no explicit capacity is given.
    pub const DEFAULT_CAPACITY: usize = 10;

    /// Builds the window. System turns inside `history` are skipped, and
    /// anything older than the last `capacity` turns is dropped silently.
    pub fn new(system_text: &str, history: &[ConversationTurn], capacity: usize) -> Self {
        let dialogue: Vec<&ConversationTurn> = history
            .iter()
            .filter(|turn| turn.role != Role::System)
            .collect();
        let skip = dialogue.len().saturating_sub(capacity);

        let mut turns = Vec::with_capacity(dialogue.len() - skip + 1);
        turns.push(ConversationTurn::system(system_text));
        turns.extend(dialogue.into_iter().skip(skip).cloned());

        Self { turns }
    }

    pub fn into_turns(self) -> Vec<ConversationTurn> {
        self.turns
    }
}

/// Whether the provider should answer in free text or in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    #[default]
    Text,
    Json,
}

/// A single outbound completion call. Built fresh for every call and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    turns: Vec<ConversationTurn>,
    temperature: f32,
    max_output_tokens: u32,
    mode: ResponseMode,
}

impl CompletionRequest {
    /// `temperature` is clamped to [0, 1]; `max_output_tokens` is at least 1.
    pub fn new(
        turns: Vec<ConversationTurn>,
        temperature: f32,
        max_output_tokens: u32,
        mode: ResponseMode,
    ) -> Self {
        let temperature = if temperature.is_finite() {
            temperature.clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            turns,
            temperature,
            max_output_tokens: max_output_tokens.max(1),
            mode,
        }
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    pub fn mode(&self) -> ResponseMode {
        self.mode
    }

    /// Text of the most recent user turn, if any.
    pub fn last_user_text(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|turn| turn.role == Role::User)
            .map(ConversationTurn::text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl ConversationWindow {
        fn turns(&self) -> &[ConversationTurn] {
            &self.turns
        }

        fn len(&self) -> usize {
            self.turns.len()
        }
    }

    fn history(n: usize) -> Vec<ConversationTurn> {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    ConversationTurn::user(format!("question {i}"))
                } else {
                    ConversationTurn::assistant(format!("answer {i}"))
                }
            })
            .collect()
    }

    #[test]
    fn test_window_keeps_last_ten_in_order() {
        let window = ConversationWindow::new("sys", &history(15), 10);
        let turns = window.turns();

        assert_eq!(turns.len(), 11);
        assert_eq!(turns[0], ConversationTurn::system("sys"));
        let texts: Vec<&str> = turns[1..].iter().map(ConversationTurn::text).collect();
        assert_eq!(texts.first(), Some(&"answer 5"));
        assert_eq!(texts.last(), Some(&"question 14"));
        assert!(turns[1..].iter().all(|t| t.role() != Role::System));
    }

    #[test]
    fn test_window_short_history_kept_whole() {
        let window = ConversationWindow::new("sys", &history(3), 10);
        assert_eq!(window.len(), 4);
    }

    #[test]
    fn test_window_drops_embedded_system_turns() {
        let mut turns = history(2);
        turns.insert(1, ConversationTurn::system("stray"));
        let window = ConversationWindow::new("sys", &turns, 10);

        let systems = window
            .turns()
            .iter()
            .filter(|t| t.role() == Role::System)
            .count();
        assert_eq!(systems, 1);
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn test_request_clamps_parameters() {
        let request = CompletionRequest::new(vec![], 1.7, 0, ResponseMode::Text);
        assert_eq!(request.temperature(), 1.0);
        assert_eq!(request.max_output_tokens(), 1);

        let request = CompletionRequest::new(vec![], f32::NAN, 10, ResponseMode::Json);
        assert_eq!(request.temperature(), 0.0);
    }

    #[test]
    fn test_last_user_text() {
        let request = CompletionRequest::new(
            vec![
                ConversationTurn::system("sys"),
                ConversationTurn::user("first"),
                ConversationTurn::assistant("reply"),
                ConversationTurn::user("second"),
            ],
            0.5,
            100,
            ResponseMode::Text,
        );
        assert_eq!(request.last_user_text(), Some("second"));
    }
}
