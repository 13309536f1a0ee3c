pub mod conversation;
pub mod learner;
