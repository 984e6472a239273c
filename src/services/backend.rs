use async_trait::async_trait;

use crate::{
    error::{PlannerError, Result},
    types::outcome::TokenUsage,
};

/// Raw text returned by the AI service for one prompt
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub usage: Option<TokenUsage>,
}

impl Completion {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: None,
        }
    }
}

/// The external text-generation service the planner talks to.
#[async_trait]
pub trait ItineraryBackend: Send + Sync + std::fmt::Debug {
    /// Send one prompt and return the model's raw text. No retries.
    async fn complete(&self, prompt: &str) -> Result<Completion>;
}

/// Backend that answers every prompt the same way.
///
/// Used for offline planning (always fails, so the fallback is used) and for
/// replaying a saved response.
#[derive(Debug, Clone)]
pub enum StaticBackend {
    Respond(String),
    Unavailable(String),
}

impl StaticBackend {
    pub fn respond(text: impl Into<String>) -> Self {
        StaticBackend::Respond(text.into())
    }

    pub fn offline() -> Self {
        StaticBackend::Unavailable("offline mode: AI service disabled".to_string())
    }
}

#[async_trait]
impl ItineraryBackend for StaticBackend {
    async fn complete(&self, _prompt: &str) -> Result<Completion> {
        match self {
            StaticBackend::Respond(text) => Ok(Completion::new(text.clone())),
            StaticBackend::Unavailable(reason) => Err(PlannerError::Api(reason.clone())),
        }
    }
}
