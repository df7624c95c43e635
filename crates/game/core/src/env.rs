//! Everything an action needs besides the map it mutates.

use crate::config::GameConfig;
use crate::log::MessageLog;
use crate::rng::GameRng;
use crate::templates::TemplateRegistry;

/// Read-only rules and content plus the two mutable sinks of a turn: the
/// random stream and the message log.
///
/// Validation hooks only see `&GameEnv`, so they cannot roll dice or emit
/// messages.
pub struct GameEnv<'a> {
    pub config: &'a GameConfig,
    pub templates: &'a TemplateRegistry,
    pub rng: &'a mut GameRng,
    pub log: &'a mut dyn MessageLog,
}

impl<'a> GameEnv<'a> {
    pub fn new(
        config: &'a GameConfig,
        templates: &'a TemplateRegistry,
        rng: &'a mut GameRng,
        log: &'a mut dyn MessageLog,
    ) -> Self {
        Self {
            config,
            templates,
            rng,
            log,
        }
    }
}
