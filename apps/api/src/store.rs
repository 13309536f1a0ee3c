use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::models::learner::{
    InterviewRecord, LearnerProfile, LearnerRecord, LearningGoal, Quiz, QuizAttempt,
};

/// Goals kept per learner; the oldest is dropped past this.
pub const MAX_GOALS: usize = 50;

/// In-memory per-learner state: latest quiz, quiz and interview totals, profile, goals.
///
/// Owned by `AppState` and shared behind an `Arc`; all access goes through the lock.
/// Each learner's record has a fixed upper size.
#[derive(Debug, Default)]
pub struct LearnerStore {
    learners: RwLock<HashMap<i64, LearnerRecord>>,
}

impl LearnerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything known about `user_id`; empty for unknown learners.
    pub async fn snapshot(&self, user_id: i64) -> LearnerRecord {
        self.learners
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Replaces the learner's latest quiz.
    pub async fn set_latest_quiz(&self, user_id: i64, quiz: Quiz) {
        self.learners
            .write()
            .await
            .entry(user_id)
            .or_default()
            .latest_quiz = Some(quiz);
    }

    pub async fn latest_quiz(&self, user_id: i64) -> Option<Quiz> {
        self.learners
            .read()
            .await
            .get(&user_id)
            .and_then(|r| r.latest_quiz.clone())
    }

    pub async fn record_quiz_attempt(&self, user_id: i64, attempt: QuizAttempt) {
        self.learners
            .write()
            .await
            .entry(user_id)
            .or_default()
            .quiz
            .record(attempt);
    }

    pub async fn record_interview(&self, user_id: i64, record: InterviewRecord) {
        self.learners
            .write()
            .await
            .entry(user_id)
            .or_default()
            .interviews
            .record(&record);
    }

    pub async fn set_profile(&self, user_id: i64, profile: LearnerProfile) {
        self.learners
            .write()
            .await
            .entry(user_id)
            .or_default()
            .profile = Some(profile);
    }

    pub async fn add_goal(&self, user_id: i64, goal: LearningGoal) {
        let mut learners = self.learners.write().await;
        let goals = &mut learners.entry(user_id).or_default().goals;
        if goals.len() == MAX_GOALS {
            goals.remove(0);
        }
        goals.push(goal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::learner::{GoalStatus, LearningStyle, QuizSource};
    use chrono::Utc;
    use std::sync::Arc;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_unknown_learner_is_empty() {
        let store = LearnerStore::new();
        let record = store.snapshot(42).await;
        assert!(record.latest_quiz.is_none());
        assert_eq!(record.quiz.attempts(), 0);
        assert_eq!(record.interviews.sessions(), 0);
        assert!(record.profile.is_none());
        assert!(record.goals.is_empty());
    }

    #[tokio::test]
    async fn test_learners_are_isolated() {
        let store = LearnerStore::new();
        store
            .record_quiz_attempt(
                1,
                QuizAttempt {
                    score: 2,
                    total: 5,
                    timestamp: Utc::now(),
                },
            )
            .await;

        assert_eq!(store.snapshot(1).await.quiz.attempts(), 1);
        assert_eq!(store.snapshot(2).await.quiz.attempts(), 0);
    }

    #[tokio::test]
    async fn test_latest_quiz_is_replaced() {
        let store = LearnerStore::new();
        for topic in ["Rust", "SQL"] {
            store
                .set_latest_quiz(
                    7,
                    Quiz {
                        quiz_id: Uuid::new_v4(),
                        topic: topic.to_string(),
                        questions: vec![],
                        source: QuizSource::Fallback,
                    },
                )
                .await;
        }
        assert_eq!(store.latest_quiz(7).await.unwrap().topic, "SQL");
    }

    #[tokio::test]
    async fn test_concurrent_writers_all_recorded() {
        let store = Arc::new(LearnerStore::new());
        let handles: Vec<_> = (0..20)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .record_interview(
                            3,
                            InterviewRecord {
                                clarity: f64::from(i % 10),
                                structure: 5.0,
                                tone: "neutral".to_string(),
                                timestamp: Utc::now(),
                            },
                        )
                        .await;
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.snapshot(3).await.interviews.sessions(), 20);
    }

    fn goal(title: &str) -> LearningGoal {
        LearningGoal {
            goal_id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            progress: 0,
            target_date: None,
            status: GoalStatus::Active,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_goals_are_capped_oldest_first() {
        let store = LearnerStore::new();
        for i in 0..MAX_GOALS + 2 {
            store.add_goal(8, goal(&format!("goal {i}"))).await;
        }

        let goals = store.snapshot(8).await.goals;
        assert_eq!(goals.len(), MAX_GOALS);
        assert_eq!(goals[0].title, "goal 2");
    }

    #[tokio::test]
    async fn test_profile_is_replaced() {
        let store = LearnerStore::new();
        for style in [LearningStyle::Visual, LearningStyle::Reading] {
            store
                .set_profile(
                    2,
                    LearnerProfile {
                        learning_style: style,
                        difficulty_level: "beginner".to_string(),
                    },
                )
                .await;
        }
        let profile = store.snapshot(2).await.profile.unwrap();
        assert_eq!(profile.learning_style, LearningStyle::Reading);
    }
}
