// Prompt templates for career recommendations.

/// Replace: {avg_score}, {attempts}, {clarity}, {structure}, {tones}
pub const CAREER_PROMPT_TEMPLATE: &str = "You are a career coach. \
Return JSON with keys: roles (array of 3 strings), skills (array of 4 strings), \
internships (array of 2 strings), resume_tips (array of 3 short strings), summary (string<=60 words). \
Consider this learner's metrics: quiz_avg={avg_score}%, quiz_attempts={attempts}, \
interview_clarity={clarity}/10, interview_structure={structure}/10, tones={tones}. \
Suggest realistic roles and internships based on strengths and gaps. Keep text concise.";
