// Prompt templates for quiz generation.

/// Replace: {num}, {topic}
pub const QUIZ_PROMPT_TEMPLATE: &str = "You are a quiz generator. Return JSON with field 'questions' which is an array of objects, \
each object has: question (string), options (array of 4 strings), correct_index (0-3). \
Create {num} fair, diverse MCQs for topic: {topic}.";
