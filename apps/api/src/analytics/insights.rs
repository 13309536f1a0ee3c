//! Aggregation of quiz and interview history into learner insights.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::learner::{LearnerRecord, QuizAttempt};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizInsights {
    /// Most recent attempts, oldest first.
    pub attempts: Vec<QuizAttempt>,
    pub total_attempts: usize,
    pub avg_score_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewInsights {
    pub sessions: usize,
    pub avg_clarity: f64,
    pub avg_structure: f64,
    pub tones: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insights {
    pub quiz: QuizInsights,
    pub interview: InterviewInsights,
}

/// Summarizes a learner's record.
///
/// Quiz average is total correct over total asked across all attempts,
/// as a percentage; interview scores are plain means. Both round to one decimal.
pub fn aggregate(record: &LearnerRecord) -> Insights {
    let quiz = &record.quiz;
    let avg_score_pct = if quiz.attempts() == 0 {
        0.0
    } else {
        quiz.correct() as f64 / quiz.asked().max(1) as f64 * 100.0
    };

    let interviews = &record.interviews;
    let mean = |sum: f64| {
        if interviews.sessions() == 0 {
            0.0
        } else {
            sum / interviews.sessions() as f64
        }
    };

    Insights {
        quiz: QuizInsights {
            attempts: quiz.recent().cloned().collect(),
            total_attempts: quiz.attempts(),
            avg_score_pct: round1(avg_score_pct),
        },
        interview: InterviewInsights {
            sessions: interviews.sessions(),
            avg_clarity: round1(mean(interviews.clarity_sum())),
            avg_structure: round1(mean(interviews.structure_sum())),
            tones: interviews.tones().clone(),
        },
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
