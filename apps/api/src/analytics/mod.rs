// Learner analytics: aggregated quiz/interview insights, AI summary, personalized tips.

pub mod handlers;
pub mod insights;
pub mod prompts;
pub mod recommendations;
pub mod summary;
