// Action registry: which physical sources drive which actions

use super::action::{default_bindings, Action, InputSource};
use std::collections::HashMap;

/// Source → action table. An action with no source is unregistered and
/// reads as never pressed.
#[derive(Debug, Clone, Default)]
pub struct InputConfig {
    bindings: HashMap<InputSource, Action>,
}

impl InputConfig {
    /// Empty registry, no action is registered
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bindings(bindings: impl IntoIterator<Item = (InputSource, Action)>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }

    /// Arrows/WASD, Space, J/left click, Escape/P
    pub fn with_defaults() -> Self {
        Self::from_bindings(default_bindings())
    }

    /// Route `source` to `action`. A source drives at most one action, so
    /// any previous route for it is replaced.
    pub fn bind(&mut self, source: InputSource, action: Action) {
        if let Some(previous) = self.bindings.insert(source, action) {
            if previous != action {
                log::debug!("{:?} rebound from {:?} to {:?}", source, previous, action);
            }
        }
    }

    pub fn unbind_source(&mut self, source: InputSource) -> Option<Action> {
        self.bindings.remove(&source)
    }

    /// Unregister an action entirely
    pub fn unbind_action(&mut self, action: Action) {
        self.bindings.retain(|_, bound| *bound != action);
    }

    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    pub fn get_sources(&self, action: Action) -> Vec<InputSource> {
        self.bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(source, _)| *source)
            .collect()
    }

    /// Whether the action is registered at all
    pub fn has_binding(&self, action: Action) -> bool {
        self.bindings.values().any(|bound| *bound == action)
    }
}
