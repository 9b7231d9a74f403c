//! Error types for FastCounter
//!
//! Counter text generation itself never fails: every failure mode of a
//! numbering system funnels into the fallback chain and ultimately into
//! `decimal`. Errors only surface while ingesting `@counter-style`
//! descriptors handed over by a rule parser.
//!
//! All errors use the `thiserror` crate for minimal boilerplate and
//! proper error trait implementations.

use thiserror::Error;

/// Result type alias for FastCounter operations
///
/// # Examples
///
/// ```
/// use fastcounter::Result;
///
/// fn load() -> Result<()> {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for FastCounter
#[derive(Error, Debug)]
pub enum Error {
  /// A `@counter-style` descriptor set was rejected
  #[error("Counter style error: {0}")]
  CounterStyle(#[from] CounterStyleError),

  /// Serialized descriptors could not be decoded
  #[error("Descriptor decoding error: {0}")]
  Json(#[from] serde_json::Error),
}

/// Reasons a `@counter-style` rule is invalid and must be ignored
///
/// # Examples
///
/// ```
/// use fastcounter::error::CounterStyleError;
///
/// let error = CounterStyleError::NotEnoughSymbols {
///     name: "binary".to_string(),
///     system: "numeric",
///     required: 2,
///     found: 1,
/// };
/// assert!(error.to_string().contains("at least 2"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CounterStyleError {
  /// The name is a CSS-wide keyword, `none`, or a style that cannot be overridden
  #[error("'{name}' cannot be defined by a @counter-style rule")]
  ReservedName { name: String },

  /// The system requires more symbols than the rule provides
  #[error(
    "counter style '{name}' needs at least {required} symbol(s) for the {system} system, found {found}"
  )]
  NotEnoughSymbols {
    name: String,
    system: &'static str,
    required: usize,
    found: usize,
  },

  /// `additive-symbols` weights must be strictly decreasing
  #[error("counter style '{name}' has additive weights that are not strictly decreasing")]
  UnorderedAdditiveWeights { name: String },

  /// `extends` rules inherit their symbols and must not declare their own
  #[error("counter style '{name}' uses 'extends' and must not declare symbols")]
  ExtendsWithSymbols { name: String },

  /// Algorithmic script systems are only available to user-agent rules
  #[error("counter style '{name}' uses the user-agent-only system '{system}'")]
  InternalSystem { name: String, system: &'static str },

  /// A range pair whose lower bound is greater than its upper bound
  #[error("counter style '{name}' has an invalid range {lower}..{upper}")]
  InvalidRange { name: String, lower: i32, upper: i32 },

  /// An edit addressed a rule the map does not hold
  #[error("no @counter-style rule named '{name}'")]
  UnknownRule { name: String },
}
