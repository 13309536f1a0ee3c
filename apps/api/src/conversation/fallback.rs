//! Offline answers used when the remote model is unavailable or gave up.
//!
//! Triggers are checked in order against the lower-cased, trimmed message;
//! the first match wins. Unmatched messages get a generic explainer that
//! echoes the topic back.

const EMPTY_REPLY: &str = "Hi! How can I help you learn today? Ask about any topic.";

/// How a trigger recognizes a message.
enum Matcher {
    /// Any of these appears as a whole word.
    AnyWord(&'static [&'static str]),
    /// Any of these appears as a substring.
    AnyPhrase(&'static [&'static str]),
    /// The first phrase appears together with any of the others.
    PhraseWithAny(&'static str, &'static [&'static str]),
}

impl Matcher {
    fn matches(&self, msg: &str) -> bool {
        match self {
            Matcher::AnyWord(words) => msg
                .split(|c: char| !c.is_alphanumeric())
                .any(|token| words.contains(&token)),
            Matcher::AnyPhrase(phrases) => phrases.iter().any(|p| msg.contains(p)),
            Matcher::PhraseWithAny(required, others) => {
                msg.contains(required) && others.iter().any(|p| msg.contains(p))
            }
        }
    }
}

struct Trigger {
    matcher: Matcher,
    reply: &'static str,
}

const TRIGGERS: &[Trigger] = &[
    Trigger {
        matcher: Matcher::AnyWord(&["hello", "hi", "hey"]),
        reply: "Hi! What topic are you studying? I can explain concepts or make a quick quiz.",
    },
    Trigger {
        matcher: Matcher::AnyPhrase(&["neural network", "perceptron"]),
        reply: "Neural network: layers of simple units (neurons) that learn weights to map inputs to outputs.\n\
- Each layer does a linear transform + nonlinearity to model complex patterns.\n\
- Training: minimize loss with backpropagation and gradient descent.\n\
- Tiny example: pixels -> hidden -> output (cat vs dog).\n\
Want a 5-question quiz or a real-world example?",
    },
    Trigger {
        matcher: Matcher::AnyPhrase(&["machine learning"]),
        reply: "Machine learning lets models learn from data instead of fixed rules.\n\
Types: Supervised (labels), Unsupervised (no labels), Reinforcement (rewards).\n\
Pipeline: collect/clean -> split -> train -> evaluate -> iterate.",
    },
    Trigger {
        matcher: Matcher::AnyPhrase(&["linear regression"]),
        reply: "Linear regression fits y = w·x + b to predict a number.\n\
Learn w,b by minimizing MSE; assess with R²/RMSE; watch outliers.",
    },
    Trigger {
        matcher: Matcher::PhraseWithAny("sql", &["join", "query"]),
        reply: "SQL joins: INNER (match both), LEFT (all left + matches), RIGHT, FULL.\n\
Example: SELECT a.id,b.total FROM orders a INNER JOIN payments b ON a.id=b.order_id;",
    },
];

/// Deterministic canned answer for `user_message`. Never empty.
pub fn respond(user_message: &str) -> String {
    let msg = user_message.trim().to_lowercase();
    if msg.is_empty() {
        return EMPTY_REPLY.to_string();
    }

    if let Some(trigger) = TRIGGERS.iter().find(|t| t.matcher.matches(&msg)) {
        return trigger.reply.to_string();
    }

    let topic = user_message.trim().trim_end_matches('?').trim_end();
    let topic = if topic.is_empty() { "this topic" } else { topic };

    format!(
        "Here’s a quick explainer on {topic}:\n\
- What it is: a concise definition in simple terms.\n\
- Why it matters: common real-world uses.\n\
- Try it: outline 3 steps to practice.\n\
Say 'quiz on {topic}' for 5 quick questions or ask a follow-up."
    )
}
