use askama_axum::Template;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Form,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::handlers::AppState;
use crate::render;
use crate::samples::{sample, SAMPLE_MESSAGES};
use crate::spam::Verdict;

const PREVIEW_CHARS: usize = 60;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    message: String,
    samples: Vec<SampleOption>,
    has_result: bool,
    is_spam: bool,
    has_probabilities: bool,
    spam_probability: String,
    not_spam_probability: String,
    explanation: &'static str,
    warning: String,
    error: String,
}

struct SampleOption {
    index: usize,
    preview: String,
    selected: bool,
}

#[derive(Deserialize)]
pub struct IndexQuery {
    sample: Option<usize>,
}

#[derive(Deserialize)]
pub struct ClassifyForm {
    message: String,
}

impl IndexTemplate {
    fn new(message: String, selected: Option<usize>) -> Self {
        Self {
            message,
            samples: sample_options(selected),
            has_result: false,
            is_spam: false,
            has_probabilities: false,
            spam_probability: String::new(),
            not_spam_probability: String::new(),
            explanation: render::EXPLANATION,
            warning: String::new(),
            error: String::new(),
        }
    }
}

fn sample_options(selected: Option<usize>) -> Vec<SampleOption> {
    SAMPLE_MESSAGES
        .iter()
        .enumerate()
        .map(|(index, message)| {
            let trimmed = message.trim();
            let mut preview: String = trimmed.chars().take(PREVIEW_CHARS).collect();
            if trimmed.chars().count() > PREVIEW_CHARS {
                preview.push('…');
            }
            if preview.is_empty() {
                preview = "(blank)".to_string();
            }
            SampleOption {
                index,
                preview,
                selected: selected == Some(index),
            }
        })
        .collect()
}

// Form page (GET), optionally prefilled with an example message
pub async fn index(Query(query): Query<IndexQuery>) -> impl IntoResponse {
    let selected = query.sample.filter(|i| *i < SAMPLE_MESSAGES.len());
    let message = selected.and_then(sample).unwrap_or_default().to_string();
    IndexTemplate::new(message, selected)
}

// Form submission (POST)
pub async fn classify_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ClassifyForm>,
) -> impl IntoResponse {
    let mut page = IndexTemplate::new(form.message, None);

    match state.detector.check(&page.message) {
        Ok(Verdict::EmptyMessage) => {
            page.warning = render::EMPTY_MESSAGE_WARNING.to_string();
        }
        Ok(Verdict::Neutral { warning }) => {
            page.has_result = true;
            page.warning = warning.unwrap_or_default();
        }
        Ok(Verdict::Classified { prediction, .. }) => {
            page.has_result = true;
            page.has_probabilities = true;
            page.is_spam = prediction.is_spam();
            page.spam_probability = render::format_percent(prediction.probabilities.spam);
            page.not_spam_probability = render::format_percent(prediction.probabilities.not_spam);
        }
        Err(e) => {
            page.error = render::render_error(&e);
        }
    }

    page
}
