//! Text rendering of detector results

use crate::error::SpamError;
use crate::spam::{Probabilities, Verdict};

pub const EMPTY_MESSAGE_WARNING: &str = "Please enter an SMS message.";

pub const SPAM_BANNER: &str = "📩 This is a Spam message.";

pub const NOT_SPAM_BANNER: &str = "✅ This is not a Spam message.";

pub const EXPLANATION: &str = "This prediction is based on a machine learning model trained on a dataset of SMS messages. It analyzes the text content of the message and predicts whether it is likely to be spam or not spam.";

/// Format a probability as a percentage with two decimals
pub fn format_percent(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

pub fn probability_lines(probabilities: &Probabilities) -> [String; 2] {
    [
        format!("Spam Probability: {}", format_percent(probabilities.spam)),
        format!("Not Spam Probability: {}", format_percent(probabilities.not_spam)),
    ]
}

/// Render a verdict as display lines
pub fn render_verdict(verdict: &Verdict) -> Vec<String> {
    match verdict {
        Verdict::EmptyMessage => vec![format!("⚠ {}", EMPTY_MESSAGE_WARNING)],
        Verdict::Neutral { warning } => {
            let mut lines = Vec::new();
            if let Some(warning) = warning {
                lines.push(format!("⚠ {}", warning));
            }
            lines.push(NOT_SPAM_BANNER.to_string());
            lines.push("No recognizable words left to classify.".to_string());
            lines
        }
        Verdict::Classified { prediction, .. } => {
            let banner = if prediction.is_spam() {
                SPAM_BANNER
            } else {
                NOT_SPAM_BANNER
            };
            let [spam, not_spam] = probability_lines(&prediction.probabilities);
            vec![
                banner.to_string(),
                spam,
                not_spam,
                String::new(),
                "Explanation:".to_string(),
                EXPLANATION.to_string(),
            ]
        }
    }
}

/// Render an error for display
pub fn render_error(err: &SpamError) -> String {
    match err {
        SpamError::ModelNotLoaded(reason) => {
            format!("✗ Failed to load pre-trained models: {}", reason)
        }
        SpamError::Prediction(reason) => format!("✗ Prediction failed: {}", reason),
        other => format!("✗ {}", other),
    }
}
