use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of most recent quiz attempts kept per learner.
pub const RECENT_ATTEMPTS: usize = 10;

/// A multiple-choice question with exactly four options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

/// Where a quiz's questions came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizSource {
    Ai,
    Fallback,
}

/// The latest quiz handed to a learner; grading is always against this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub quiz_id: Uuid,
    pub topic: String,
    pub questions: Vec<QuizQuestion>,
    pub source: QuizSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub score: usize,
    pub total: usize,
    pub timestamp: DateTime<Utc>,
}

/// Scores kept from one interview-coach session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewRecord {
    pub clarity: f64,
    pub structure: f64,
    pub tone: String,
    pub timestamp: DateTime<Utc>,
}

/// Running quiz totals plus the last `RECENT_ATTEMPTS` attempts.
#[derive(Debug, Clone, Default)]
pub struct QuizHistory {
    recent: VecDeque<QuizAttempt>,
    attempts: usize,
    correct: usize,
    asked: usize,
}

impl QuizHistory {
    pub fn record(&mut self, attempt: QuizAttempt) {
        self.attempts += 1;
        self.correct += attempt.score;
        self.asked += attempt.total;

        if self.recent.len() == RECENT_ATTEMPTS {
            self.recent.pop_front();
        }
        self.recent.push_back(attempt);
    }

    /// Oldest first.
    pub fn recent(&self) -> impl Iterator<Item = &QuizAttempt> {
        self.recent.iter()
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn asked(&self) -> usize {
        self.asked
    }
}

/// Running interview-coach totals. Tones are lower-cased; blank tones are not counted.
#[derive(Debug, Clone, Default)]
pub struct InterviewHistory {
    sessions: usize,
    clarity_sum: f64,
    structure_sum: f64,
    tones: BTreeMap<String, u32>,
}

impl InterviewHistory {
    pub fn record(&mut self, record: &InterviewRecord) {
        self.sessions += 1;
        self.clarity_sum += record.clarity;
        self.structure_sum += record.structure;

        let tone = record.tone.trim().to_lowercase();
        if !tone.is_empty() {
            *self.tones.entry(tone).or_insert(0) += 1;
        }
    }

    pub fn sessions(&self) -> usize {
        self.sessions
    }

    pub fn clarity_sum(&self) -> f64 {
        self.clarity_sum
    }

    pub fn structure_sum(&self) -> f64 {
        self.structure_sum
    }

    pub fn tones(&self) -> &BTreeMap<String, u32> {
        &self.tones
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningStyle {
    #[default]
    Visual,
    Auditory,
    Kinesthetic,
    Reading,
}

/// How the learner prefers to be taught.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerProfile {
    #[serde(default)]
    pub learning_style: LearningStyle,
    #[serde(default = "default_difficulty")]
    pub difficulty_level: String,
}

pub fn default_difficulty() -> String {
    "intermediate".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
    Paused,
}

/// A learning goal set by the learner. `progress` is a percentage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningGoal {
    pub goal_id: Uuid,
    pub title: String,
    pub description: String,
    pub progress: u8,
    pub target_date: Option<NaiveDate>,
    pub status: GoalStatus,
    pub created_at: DateTime<Utc>,
}

/// Everything the service remembers about one learner.
#[derive(Debug, Clone, Default)]
pub struct LearnerRecord {
    pub latest_quiz: Option<Quiz>,
    pub quiz: QuizHistory,
    pub interviews: InterviewHistory,
    pub profile: Option<LearnerProfile>,
    pub goals: Vec<LearningGoal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(score: usize, total: usize) -> QuizAttempt {
        QuizAttempt {
            score,
            total,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_quiz_history_keeps_totals_but_bounds_recent() {
        let mut history = QuizHistory::default();
        for i in 0..25 {
            history.record(attempt(i % 3, 3));
        }

        assert_eq!(history.attempts(), 25);
        assert_eq!(history.asked(), 75);
        assert_eq!(history.correct(), (0..25).map(|i| i % 3).sum::<usize>());
        assert_eq!(history.recent().count(), RECENT_ATTEMPTS);
        // attempts 15..25 remain, oldest first
        assert_eq!(history.recent().next().map(|a| a.score), Some(0));
    }

    #[test]
    fn test_interview_history_counts_normalized_tones() {
        let mut history = InterviewHistory::default();
        for tone in ["Calm", " calm ", ""] {
            history.record(&InterviewRecord {
                clarity: 5.0,
                structure: 4.0,
                tone: tone.to_string(),
                timestamp: Utc::now(),
            });
        }

        assert_eq!(history.sessions(), 3);
        assert_eq!(history.clarity_sum(), 15.0);
        assert_eq!(history.tones().get("calm"), Some(&2));
        assert_eq!(history.tones().len(), 1);
    }

    #[test]
    fn test_profile_defaults() {
        let profile: LearnerProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile.learning_style, LearningStyle::Visual);
        assert_eq!(profile.difficulty_level, "intermediate");
    }
}
