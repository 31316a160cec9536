//! Shared helpers for integration tests

#![allow(dead_code)]

use spam_rs::config::{Config, ModelConfig};
use spam_rs::spam::{ModelContext, SpamDetector};
use spam_rs::text::TextNormalizer;
use std::path::PathBuf;
use std::sync::Arc;

/// Demo artifacts shipped with the crate
pub fn demo_model_config() -> ModelConfig {
    let models = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models");
    ModelConfig {
        vectorizer_path: models.join("vectorizer.json"),
        classifier_path: models.join("model.json"),
    }
}

pub fn demo_config() -> Config {
    Config {
        models: demo_model_config(),
        ..Config::default()
    }
}

pub fn demo_detector() -> SpamDetector {
    let context = ModelContext::load(&demo_model_config()).expect("demo models should load");
    SpamDetector::new(TextNormalizer::default(), Arc::new(context))
}
