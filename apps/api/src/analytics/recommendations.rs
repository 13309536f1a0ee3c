//! Rule-based study recommendations from a learner's insights and profile.

use crate::analytics::insights::Insights;
use crate::analytics::prompts::{
    AUDITORY_TIP, CONSISTENCY_TIP, INTERACTIVE_TIP, KINESTHETIC_TIP, READING_TIP,
    REVIEW_CONCEPTS_TIP, STUDY_TIPS, VISUAL_TIP,
};
use crate::models::learner::{LearnerProfile, LearningStyle};

pub const RECOMMENDATION_COUNT: usize = 5;

/// Quiz average (percent) below which concept review is suggested.
const REVIEW_THRESHOLD: f64 = 70.0;
/// Fewer recorded sessions than this earns the consistency tip.
const CONSISTENT_SESSIONS: usize = 3;
/// Interview clarity below this earns the interactive-learning tip.
const CLARITY_THRESHOLD: f64 = 6.0;

/// Up to `RECOMMENDATION_COUNT` tips, most specific first.
///
/// Rules fire on quiz average, activity and interview clarity, then the
/// learning style adds its own tip. General study tips fill the rest.
pub fn personalized_recommendations(
    insights: &Insights,
    profile: Option<&LearnerProfile>,
) -> Vec<String> {
    let quiz = &insights.quiz;
    let interview = &insights.interview;
    let mut tips: Vec<&str> = Vec::new();

    if quiz.total_attempts > 0 && quiz.avg_score_pct < REVIEW_THRESHOLD {
        tips.push(REVIEW_CONCEPTS_TIP);
    }
    if quiz.total_attempts + interview.sessions < CONSISTENT_SESSIONS {
        tips.push(CONSISTENCY_TIP);
    }
    if interview.sessions > 0 && interview.avg_clarity < CLARITY_THRESHOLD {
        tips.push(INTERACTIVE_TIP);
    }
    if let Some(profile) = profile {
        tips.push(style_tip(profile.learning_style));
    }

    for &tip in STUDY_TIPS {
        if tips.len() >= RECOMMENDATION_COUNT {
            break;
        }
        if !tips.contains(&tip) {
            tips.push(tip);
        }
    }

    tips.into_iter()
        .take(RECOMMENDATION_COUNT)
        .map(str::to_string)
        .collect()
}

fn style_tip(style: LearningStyle) -> &'static str {
    match style {
        LearningStyle::Visual => VISUAL_TIP,
        LearningStyle::Auditory => AUDITORY_TIP,
        LearningStyle::Kinesthetic => KINESTHETIC_TIP,
        LearningStyle::Reading => READING_TIP,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::insights::aggregate;
    use crate::models::learner::{InterviewRecord, LearnerRecord, QuizAttempt};
    use chrono::Utc;

    fn record_with_quizzes(results: &[(usize, usize)]) -> LearnerRecord {
        let mut record = LearnerRecord::default();
        for &(score, total) in results {
            record.quiz.record(QuizAttempt {
                score,
                total,
                timestamp: Utc::now(),
            });
        }
        record
    }

    #[test]
    fn test_new_learner_gets_consistency_tip_then_general_tips() {
        let tips = personalized_recommendations(&aggregate(&LearnerRecord::default()), None);

        assert_eq!(tips.len(), RECOMMENDATION_COUNT);
        assert_eq!(tips[0], CONSISTENCY_TIP);
        assert_eq!(tips[1], STUDY_TIPS[0]);
        assert!(!tips.iter().any(|t| t == REVIEW_CONCEPTS_TIP));
    }

    #[test]
    fn test_low_quiz_average_suggests_review() {
        let insights = aggregate(&record_with_quizzes(&[(2, 5), (3, 5), (4, 5)]));
        let tips = personalized_recommendations(&insights, None);
        assert_eq!(tips[0], REVIEW_CONCEPTS_TIP);
        assert!(!tips.iter().any(|t| t == CONSISTENCY_TIP));
    }

    #[test]
    fn test_strong_quiz_average_skips_review() {
        let insights = aggregate(&record_with_quizzes(&[(5, 5), (4, 5), (4, 5)]));
        let tips = personalized_recommendations(&insights, None);
        assert!(!tips.iter().any(|t| t == REVIEW_CONCEPTS_TIP));
        assert_eq!(tips, STUDY_TIPS[..5].to_vec());
    }

    #[test]
    fn test_learning_style_adds_its_tip() {
        let insights = aggregate(&record_with_quizzes(&[(5, 5), (5, 5), (5, 5)]));
        let profile = LearnerProfile {
            learning_style: LearningStyle::Auditory,
            difficulty_level: "beginner".to_string(),
        };
        let tips = personalized_recommendations(&insights, Some(&profile));
        assert_eq!(tips[0], AUDITORY_TIP);
        assert_eq!(tips.len(), RECOMMENDATION_COUNT);
    }

    #[test]
    fn test_unclear_interviews_suggest_interactive_learning() {
        let mut record = record_with_quizzes(&[(1, 5), (1, 5)]);
        record.interviews.record(&InterviewRecord {
            clarity: 4.0,
            structure: 5.0,
            tone: "nervous".to_string(),
            timestamp: Utc::now(),
        });
        let profile = LearnerProfile {
            learning_style: LearningStyle::Kinesthetic,
            difficulty_level: "beginner".to_string(),
        };

        let tips = personalized_recommendations(&aggregate(&record), Some(&profile));
        assert_eq!(
            tips[..3],
            [REVIEW_CONCEPTS_TIP, INTERACTIVE_TIP, KINESTHETIC_TIP]
        );
    }
}
