use serde::{Deserialize, Serialize};

use crate::models::learner::QuizQuestion;

/// One submitted answer: question position and chosen option.
#[derive(Debug, Clone, Deserialize)]
pub struct Answer {
    pub index: i64,
    pub choice: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GradeReport {
    pub score: usize,
    pub total: usize,
    pub feedback: Vec<String>,
}

/// Scores `answers` against `questions`.
///
/// Answers pointing outside the quiz are ignored. Every wrong answer adds a
/// hint naming the correct option.
pub fn grade(questions: &[QuizQuestion], answers: &[Answer]) -> GradeReport {
    let mut score = 0;
    let mut feedback = Vec::new();

    for answer in answers {
        let Some(question) = usize::try_from(answer.index)
            .ok()
            .and_then(|i| questions.get(i))
        else {
            continue;
        };

        let correct = question.correct_index;
        if usize::try_from(answer.choice).ok() == Some(correct) {
            score += 1;
        } else {
            let option = question
                .options
                .get(correct)
                .map(String::as_str)
                .unwrap_or_default();
            feedback.push(format!(
                "Q{}: Consider reviewing {option}",
                answer.index + 1
            ));
        }
    }

    GradeReport {
        score,
        total: questions.len(),
        feedback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::generator::static_questions;

    fn answer(index: i64, choice: i64) -> Answer {
        Answer { index, choice }
    }

    #[test]
    fn test_all_correct() {
        let questions = static_questions("Rust", 3);
        let report = grade(&questions, &[answer(0, 0), answer(1, 1), answer(2, 2)]);
        assert_eq!(
            report,
            GradeReport {
                score: 3,
                total: 3,
                feedback: vec![]
            }
        );
    }

    #[test]
    fn test_wrong_answer_feedback_names_correct_option() {
        let questions = static_questions("Rust", 2);
        let report = grade(&questions, &[answer(0, 0), answer(1, 3)]);
        assert_eq!(report.score, 1);
        assert_eq!(report.feedback, vec!["Q2: Consider reviewing Rust concept B"]);
    }

    #[test]
    fn test_out_of_range_answers_ignored() {
        let questions = static_questions("Rust", 2);
        let report = grade(&questions, &[answer(-1, 0), answer(5, 0), answer(0, -2)]);
        assert_eq!(report.score, 0);
        assert_eq!(report.total, 2);
        assert_eq!(report.feedback.len(), 1);
    }

    #[test]
    fn test_no_answers_scores_zero() {
        let report = grade(&static_questions("Rust", 4), &[]);
        assert_eq!(report.score, 0);
        assert_eq!(report.total, 4);
    }
}
