pub mod coach;
pub mod handlers;
pub mod prompts;
