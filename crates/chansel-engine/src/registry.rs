use crate::strategy::{GuideStrategy, SelectionStrategy, TileStrategy};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry mapping strategy identifiers to implementations.
///
/// Populated once at startup. Adding a provider family means registering
/// one more strategy; the coordinator never changes.
#[derive(Default)]
pub struct StrategyRegistry {
    strategies: HashMap<String, Arc<dyn SelectionStrategy>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Registry with every strategy shipped in this crate.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(TileStrategy::new()));
        registry.register(Arc::new(GuideStrategy::new()));
        registry
    }

    /// Register a strategy under its identifier.
    /// Returns true if an existing strategy with the same identifier was
    /// replaced.
    pub fn register(&mut self, strategy: Arc<dyn SelectionStrategy>) -> bool {
        self.strategies
            .insert(strategy.id().to_string(), strategy)
            .is_some()
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn SelectionStrategy>> {
        self.strategies.get(id).cloned()
    }

    /// Registered identifiers, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("strategies", &self.ids())
            .finish()
    }
}
