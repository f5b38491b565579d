pub mod cache;
pub mod config;
pub mod coordinator;
pub mod diagnostics;
pub mod presets;
pub mod primitives;
pub mod registry;
pub mod strategy;

pub use chansel_common::{normalize_name, protocol};
pub use coordinator::ChannelSelector;
pub use registry::StrategyRegistry;
pub use strategy::{ProviderProfile, SelectionStrategy, StrategyContext};
