// Prompt templates for learner analytics.

/// System prompt for the free-text summary retry.
pub const SUMMARY_SYSTEM: &str = "You are a helpful analytics coach.";

/// Replace: {avg_score}, {attempts}, {clarity}, {structure}, {tones}
pub const SUMMARY_PROMPT_TEMPLATE: &str = "You are an analytics coach. Given quiz and interview metrics, \
write a concise 4-6 line summary with strengths and top 3 improvement suggestions.
Quiz avg score: {avg_score}%. Attempts: {attempts}.
Interview clarity avg: {clarity}, structure avg: {structure}, tones: {tones}
Focus on actionable advice and encouragement.";

/// Appended to the summary prompt for the JSON-mode attempt.
pub const SUMMARY_JSON_SUFFIX: &str = "\nReturn JSON with a single key: summary (string).";

/// General study tips, used to top up personalized recommendations.
pub const STUDY_TIPS: &[&str] = &[
    "Set specific, achievable learning goals for each study session",
    "Take regular breaks every 25-30 minutes to maintain focus",
    "Use active recall techniques like flashcards and practice quizzes",
    "Create a dedicated study space free from distractions",
    "Review and summarize what you've learned at the end of each session",
    "Connect new information to what you already know",
    "Teach someone else what you've learned to reinforce understanding",
    "Use different learning methods: reading, videos, hands-on practice",
    "Track your progress and celebrate small victories",
    "Ask questions when you don't understand something",
];

pub const REVIEW_CONCEPTS_TIP: &str = "Focus on reviewing difficult concepts and taking practice quizzes";
pub const CONSISTENCY_TIP: &str = "Try to study more consistently - even 15 minutes daily helps";
pub const INTERACTIVE_TIP: &str =
    "Try interactive learning methods like group discussions or hands-on projects";

pub const VISUAL_TIP: &str = "Create mind maps and visual summaries of key concepts";
pub const AUDITORY_TIP: &str = "Listen to educational podcasts and participate in study groups";
pub const KINESTHETIC_TIP: &str = "Engage in hands-on projects and practical exercises";
pub const READING_TIP: &str = "Read comprehensive guides and create detailed written notes";
