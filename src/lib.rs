pub mod debug;
pub mod error;
pub mod style;

pub use error::{Error, Result};

// Re-export the counter style entry points
pub use style::counter_styles::{CounterStyleName, CounterStyleRule, CounterSystem, SpeakAs};
pub use style::{CounterStyle, CounterStyleMap, CounterStyleRef};
