//! Runtime configuration toggles.

pub mod runtime;

pub use runtime::{
  runtime_toggles, set_runtime_toggles, with_runtime_toggles, CounterStyleConfig, RuntimeToggles,
  RuntimeTogglesGuard,
};
