// Learner profile (learning style, difficulty) and learning goals.

pub mod goals;
pub mod handlers;
