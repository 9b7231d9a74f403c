//! Counter style system
//!
//! Descriptor types, the numbering-system algorithms, resolved counter styles
//! and the per-scope maps that own them.

pub mod counter_algorithms;
pub mod counter_style;
pub mod counter_style_map;
pub mod counter_styles;
pub mod predefined;

pub use counter_style::{CounterStyle, CounterStyleId, CounterStyleRef};
pub use counter_style_map::CounterStyleMap;
pub use counter_styles::{
  ArmenianCase, CjkVariant, CounterRange, CounterStyleName, CounterStyleRule, CounterSystem,
  RuleOrigin, SpeakAs, SystemDescriptor,
};
