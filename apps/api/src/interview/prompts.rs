// Prompt templates for the interview coach.

/// Replace: {answer}
pub const COACH_PROMPT_TEMPLATE: &str = "You are an interview coach. Return JSON with keys: summary (string, <=60 words), \
tone (string), clarity (1-10), structure (1-10), recommendations (array of 3 short strings). \
Analyze this answer and be supportive, specific.
Answer: {answer}";

pub const HR_QUESTION: &str = "HR interview: Tell me about a time you overcame a challenge.";
