//! Quiz generation — AI-written questions with a static fallback quiz.
//!
//! The model's reply is validated question by question; anything without
//! exactly four options and an integer answer index is dropped. If nothing
//! survives, the learner gets a placeholder quiz for the topic instead.

use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::llm_client::LlmClient;
use crate::models::learner::{Quiz, QuizQuestion, QuizSource};
use crate::quiz::prompts::QUIZ_PROMPT_TEMPLATE;

pub const DEFAULT_TOPIC: &str = "General";
pub const DEFAULT_QUESTION_COUNT: usize = 5;
pub const MAX_QUESTION_COUNT: usize = 15;
const OPTION_COUNT: usize = 4;
const OPTION_LABELS: [char; OPTION_COUNT] = ['A', 'B', 'C', 'D'];

/// Shape the quiz prompt asks the model for.
#[derive(Debug, Deserialize)]
pub struct QuizPayload {
    pub questions: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
pub struct RawQuestion {
    #[serde(default)]
    pub question: Value,
    #[serde(default)]
    pub options: Value,
    #[serde(default)]
    pub correct_index: Value,
}

/// Trimmed topic, or `DEFAULT_TOPIC` when blank.
pub fn normalize_topic(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(topic) if !topic.is_empty() => topic.to_string(),
        _ => DEFAULT_TOPIC.to_string(),
    }
}

/// Missing or zero counts mean the default; the rest is clamped to 1..=15.
pub fn clamp_question_count(requested: Option<i64>) -> usize {
    match requested {
        None | Some(0) => DEFAULT_QUESTION_COUNT,
        Some(n) => n.clamp(1, MAX_QUESTION_COUNT as i64) as usize,
    }
}

/// Keeps the first `limit` well-formed questions from the model's reply.
pub fn validate_questions(payload: QuizPayload, limit: usize) -> Vec<QuizQuestion> {
    payload
        .questions
        .into_iter()
        .take(limit)
        .filter_map(|raw| {
            let options = raw.options.as_array()?;
            if options.len() != OPTION_COUNT {
                return None;
            }
            let correct = raw.correct_index.as_i64()?;

            Some(QuizQuestion {
                question: value_to_text(&raw.question),
                options: options.iter().map(value_to_text).collect(),
                correct_index: correct.rem_euclid(OPTION_COUNT as i64) as usize,
            })
        })
        .collect()
}

/// Placeholder quiz used when no AI questions are available.
pub fn static_questions(topic: &str, count: usize) -> Vec<QuizQuestion> {
    (0..count)
        .map(|i| QuizQuestion {
            question: format!("[{topic}] Question {}: Select the best answer.", i + 1),
            options: OPTION_LABELS
                .iter()
                .map(|label| format!("{topic} concept {label}"))
                .collect(),
            correct_index: i % OPTION_COUNT,
        })
        .collect()
}

/// Builds a quiz of `count` questions on `topic`, preferring AI questions.
pub async fn generate_quiz(llm: &LlmClient, topic: &str, count: usize) -> Quiz {
    let prompt = QUIZ_PROMPT_TEMPLATE
        .replace("{num}", &count.to_string())
        .replace("{topic}", topic);

    let ai_questions = llm
        .complete_structured::<QuizPayload>(&prompt)
        .await
        .map(|payload| validate_questions(payload, count))
        .unwrap_or_default();

    let (questions, source) = if ai_questions.is_empty() {
        (static_questions(topic, count), QuizSource::Fallback)
    } else {
        (ai_questions, QuizSource::Ai)
    };

    info!(
        "Generated {} quiz questions on '{}' ({:?})",
        questions.len(),
        topic,
        source
    );

    Quiz {
        quiz_id: Uuid::new_v4(),
        topic: topic.to_string(),
        questions,
        source,
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn payload(value: serde_json::Value) -> QuizPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalize_topic() {
        assert_eq!(normalize_topic(Some("  Rust  ")), "Rust");
        assert_eq!(normalize_topic(Some("   ")), DEFAULT_TOPIC);
        assert_eq!(normalize_topic(None), DEFAULT_TOPIC);
    }

    #[test]
    fn test_clamp_question_count() {
        assert_eq!(clamp_question_count(None), 5);
        assert_eq!(clamp_question_count(Some(0)), 5);
        assert_eq!(clamp_question_count(Some(-3)), 1);
        assert_eq!(clamp_question_count(Some(99)), 15);
        assert_eq!(clamp_question_count(Some(7)), 7);
    }

    #[test]
    fn test_static_questions_shape() {
        let questions = static_questions("Algebra", 6);
        assert_eq!(questions.len(), 6);
        assert_eq!(
            questions[0].question,
            "[Algebra] Question 1: Select the best answer."
        );
        assert_eq!(questions[0].options[3], "Algebra concept D");
        let answers: Vec<usize> = questions.iter().map(|q| q.correct_index).collect();
        assert_eq!(answers, vec![0, 1, 2, 3, 0, 1]);
    }

    #[test]
    fn test_validate_drops_malformed_questions() {
        let questions = validate_questions(
            payload(json!({"questions": [
                {"question": "Good?", "options": ["a", "b", "c", "d"], "correct_index": 2},
                {"question": "Three options", "options": ["a", "b", "c"], "correct_index": 0},
                {"question": "No index", "options": ["a", "b", "c", "d"]},
                {"question": "String index", "options": ["a", "b", "c", "d"], "correct_index": "1"},
                {"question": 42, "options": ["a", 2, true, null], "correct_index": -1}
            ]})),
            10,
        );

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].correct_index, 2);
        assert_eq!(questions[1].question, "42");
        assert_eq!(questions[1].options, vec!["a", "2", "true", ""]);
        assert_eq!(questions[1].correct_index, 3);
    }

    #[test]
    fn test_validate_respects_limit() {
        let raw: Vec<_> = (0..8)
            .map(|i| json!({"question": format!("q{i}"), "options": ["a", "b", "c", "d"], "correct_index": 5}))
            .collect();
        let questions = validate_questions(payload(json!({ "questions": raw })), 3);
        assert_eq!(questions.len(), 3);
        assert!(questions.iter().all(|q| q.correct_index == 1));
    }

    #[tokio::test]
    async fn test_unconfigured_llm_yields_static_quiz() {
        let llm = LlmClient::new(None, "http://127.0.0.1:9", "m").unwrap();
        let quiz = generate_quiz(&llm, "Python", 4).await;

        assert_eq!(quiz.source, QuizSource::Fallback);
        assert_eq!(quiz.questions, static_questions("Python", 4));
    }

    #[tokio::test]
    async fn test_ai_questions_used_when_valid() {
        let server = MockServer::start().await;
        let reply = json!({"questions": [
            {"question": "What is ownership?", "options": ["w", "x", "y", "z"], "correct_index": 1}
        ]});
        Mock::given(method("POST"))
            .and(body_string_contains("topic: Rust"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": reply.to_string()}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let llm = LlmClient::new(Some("k".to_string()), &server.uri(), "m").unwrap();
        let quiz = generate_quiz(&llm, "Rust", 5).await;

        assert_eq!(quiz.source, QuizSource::Ai);
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.questions[0].question, "What is ownership?");
    }
}
