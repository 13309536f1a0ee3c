//! Prompt assembly: system prompt + bounded history window + the new message.

use crate::analytics::insights::Insights;
use crate::conversation::prompts::{
    AUDITORY_STYLE, COMPANION_SYSTEM, DIFFICULTY_TEMPLATE, KINESTHETIC_STYLE, READING_STYLE,
    VISUAL_STYLE,
};
use crate::models::conversation::{
    CompletionRequest, ConversationTurn, ConversationWindow, ResponseMode,
};
use crate::models::learner::{LearnerProfile, LearningStyle};

const CHAT_TEMPERATURE: f32 = 0.7;
const CHAT_MAX_OUTPUT_TOKENS: u32 = 500;

/// Turns a system prompt, prior turns and a new message into a `CompletionRequest`.
///
/// Pure: the same inputs always produce the same request.
#[derive(Debug, Clone, Copy)]
pub struct PromptBuilder {
    pub window_capacity: usize,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self {
            window_capacity: ConversationWindow::DEFAULT_CAPACITY,
            temperature: CHAT_TEMPERATURE,
            max_output_tokens: CHAT_MAX_OUTPUT_TOKENS,
        }
    }
}

impl PromptBuilder {
    /// `new_message` is expected to be non-empty; the HTTP layer rejects blank input.
    pub fn build(
        &self,
        system_text: &str,
        history: &[ConversationTurn],
        new_message: &str,
    ) -> CompletionRequest {
        let mut turns = ConversationWindow::new(system_text, history, self.window_capacity)
            .into_turns();
        turns.push(ConversationTurn::user(new_message));

        CompletionRequest::new(
            turns,
            self.temperature,
            self.max_output_tokens,
            ResponseMode::Text,
        )
    }
}

/// The companion system prompt, tailored to the learner.
///
/// A profile adds a learning-style line and the target difficulty; recorded
/// metrics add a learner-context line.
pub fn personalized_system_prompt(
    insights: &Insights,
    profile: Option<&LearnerProfile>,
) -> String {
    let mut prompt = COMPANION_SYSTEM.to_string();

    if let Some(profile) = profile {
        let style = match profile.learning_style {
            LearningStyle::Visual => VISUAL_STYLE,
            LearningStyle::Auditory => AUDITORY_STYLE,
            LearningStyle::Kinesthetic => KINESTHETIC_STYLE,
            LearningStyle::Reading => READING_STYLE,
        };
        let difficulty = match profile.difficulty_level.trim() {
            "" => "intermediate",
            level => level,
        };
        prompt.push_str(&format!(
            "\n\n{style} {}",
            DIFFICULTY_TEMPLATE.replace("{difficulty}", difficulty)
        ));
    }

    let quiz_attempts = insights.quiz.total_attempts;
    let has_interviews = insights.interview.sessions > 0;
    if quiz_attempts == 0 && !has_interviews {
        return prompt;
    }

    let mut context = Vec::new();
    if quiz_attempts > 0 {
        context.push(format!(
            "average quiz score {}% over {} attempts",
            insights.quiz.avg_score_pct, quiz_attempts
        ));
    }
    if has_interviews {
        context.push(format!(
            "interview clarity {}/10 and structure {}/10",
            insights.interview.avg_clarity, insights.interview.avg_structure
        ));
    }

    prompt.push_str(&format!(
        "\n\nLearner context: {}. Adjust depth and encouragement accordingly.",
        context.join("; ")
    ));
    prompt
}
