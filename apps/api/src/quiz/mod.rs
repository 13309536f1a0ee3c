// Smart Quiz: AI question generation with static fallback, grading against the latest quiz.

pub mod generator;
pub mod grading;
pub mod handlers;
pub mod prompts;
