//! Handler types and dependencies

use crate::gate::RegistrationGate;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub gate: RegistrationGate,
    /// Bot's username (without @), used to match `/start@username`
    pub bot_username: Option<String>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(gate: RegistrationGate, bot_username: Option<String>) -> Self {
        Self { gate, bot_username }
    }
}
