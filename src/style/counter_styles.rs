//! `@counter-style` descriptors and counter style names.
//!
//! A rule parser hands rules over as [`CounterStyleRule`] values carrying
//! already-parsed descriptor values. This module owns their shape and the
//! validity checks that decide whether a rule may define a counter style at
//! all; resolution into runnable styles lives in
//! [`crate::style::counter_style_map`].

use crate::error::CounterStyleError;
use crate::style::predefined;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a counter style by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CounterStyleName {
  /// One of the names defined by the user-agent sheet.
  Predefined(&'static str),
  Custom(String),
  /// `none`: produces no counter text.
  None,
}

impl CounterStyleName {
  /// Create a name from authored text.
  ///
  /// Predefined names match ASCII case-insensitively and are normalized to
  /// lowercase; author-defined names are case-sensitive.
  pub fn parse(name: &str) -> Self {
    let trimmed = name.trim();
    if trimmed.eq_ignore_ascii_case("none") {
      return CounterStyleName::None;
    }
    match predefined::canonical_name(trimmed) {
      Some(canonical) => CounterStyleName::Predefined(canonical),
      None => CounterStyleName::Custom(trimmed.to_string()),
    }
  }

  /// Normalized CSS name for lookup.
  pub fn as_css_name(&self) -> &str {
    match self {
      CounterStyleName::Predefined(name) => name,
      CounterStyleName::Custom(name) => name,
      CounterStyleName::None => "none",
    }
  }
}

impl fmt::Display for CounterStyleName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_css_name())
  }
}

impl From<&str> for CounterStyleName {
  fn from(value: &str) -> Self {
    CounterStyleName::parse(value)
  }
}

impl From<String> for CounterStyleName {
  fn from(value: String) -> Self {
    CounterStyleName::parse(&value)
  }
}

/// Variants of the CJK ideographic numbering algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CjkVariant {
  SimpChineseInformal,
  SimpChineseFormal,
  TradChineseInformal,
  TradChineseFormal,
  KoreanHangulFormal,
  KoreanHanjaInformal,
  KoreanHanjaFormal,
}

/// Letter case of the Armenian numbering algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArmenianCase {
  Upper,
  Lower,
}

/// A concrete counter system.
///
/// Unlike [`SystemDescriptor`] this never names an `extends` target: a resolved
/// counter style always runs one of these algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CounterSystem {
  Cyclic,
  Fixed {
    #[serde(default = "default_first_symbol_value")]
    first_symbol_value: i32,
  },
  Symbolic,
  Alphabetic,
  Numeric,
  Additive,
  Hebrew,
  Cjk(CjkVariant),
  Armenian(ArmenianCase),
  EthiopicNumeric,
}

fn default_first_symbol_value() -> i32 {
  1
}

impl CounterSystem {
  /// `fixed` with the default first symbol value of 1.
  pub const FIXED: CounterSystem = CounterSystem::Fixed {
    first_symbol_value: 1,
  };

  /// CSS keyword of the system (`internal-*` for the algorithmic scripts).
  pub fn keyword(self) -> &'static str {
    match self {
      CounterSystem::Cyclic => "cyclic",
      CounterSystem::Fixed { .. } => "fixed",
      CounterSystem::Symbolic => "symbolic",
      CounterSystem::Alphabetic => "alphabetic",
      CounterSystem::Numeric => "numeric",
      CounterSystem::Additive => "additive",
      CounterSystem::Hebrew => "internal-hebrew",
      CounterSystem::Cjk(CjkVariant::SimpChineseInformal) => "internal-simp-chinese-informal",
      CounterSystem::Cjk(CjkVariant::SimpChineseFormal) => "internal-simp-chinese-formal",
      CounterSystem::Cjk(CjkVariant::TradChineseInformal) => "internal-trad-chinese-informal",
      CounterSystem::Cjk(CjkVariant::TradChineseFormal) => "internal-trad-chinese-formal",
      CounterSystem::Cjk(CjkVariant::KoreanHangulFormal) => "internal-korean-hangul-formal",
      CounterSystem::Cjk(CjkVariant::KoreanHanjaInformal) => "internal-korean-hanja-informal",
      CounterSystem::Cjk(CjkVariant::KoreanHanjaFormal) => "internal-korean-hanja-formal",
      CounterSystem::Armenian(ArmenianCase::Upper) => "internal-upper-armenian",
      CounterSystem::Armenian(ArmenianCase::Lower) => "internal-lower-armenian",
      CounterSystem::EthiopicNumeric => "internal-ethiopic-numeric",
    }
  }

  /// Whether the system draws its output from the `symbols`/`additive-symbols` descriptors.
  pub fn uses_symbols(self) -> bool {
    matches!(
      self,
      CounterSystem::Cyclic
        | CounterSystem::Fixed { .. }
        | CounterSystem::Symbolic
        | CounterSystem::Alphabetic
        | CounterSystem::Numeric
        | CounterSystem::Additive
    )
  }

  /// Algorithmic script systems are only reachable from the user-agent sheet.
  pub fn is_internal(self) -> bool {
    !self.uses_symbols()
  }

  /// Whether negative values get wrapped in the `negative` descriptor.
  ///
  /// `cyclic` and `fixed` have no notion of a negative value.
  pub fn uses_negative_sign(self) -> bool {
    !matches!(self, CounterSystem::Cyclic | CounterSystem::Fixed { .. })
  }

  /// Whether `value` lies in the range the system covers when `range: auto`.
  pub fn auto_range_contains(self, value: i32) -> bool {
    match self {
      CounterSystem::Cyclic
      | CounterSystem::Numeric
      | CounterSystem::Fixed { .. }
      | CounterSystem::Cjk(_) => true,
      CounterSystem::Symbolic | CounterSystem::Alphabetic | CounterSystem::EthiopicNumeric => {
        value >= 1
      }
      CounterSystem::Additive => value >= 0,
      CounterSystem::Hebrew => (0..=999_999).contains(&value),
      CounterSystem::Armenian(_) => (1..=99_999_999).contains(&value),
    }
  }

  /// The `speak-as` mode `auto` maps to.
  pub fn auto_speak_as(self) -> SpeakAs {
    match self {
      CounterSystem::Cyclic => SpeakAs::Bullets,
      // `spell-out` is not supported; `words` is the closest rendering.
      CounterSystem::Alphabetic => SpeakAs::Words,
      _ => SpeakAs::Numbers,
    }
  }
}

impl fmt::Display for CounterSystem {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CounterSystem::Fixed { first_symbol_value } => write!(f, "fixed {}", first_symbol_value),
      other => f.write_str(other.keyword()),
    }
  }
}

/// The `system` descriptor as authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SystemDescriptor {
  System(CounterSystem),
  Extends(String),
}

impl From<CounterSystem> for SystemDescriptor {
  fn from(value: CounterSystem) -> Self {
    SystemDescriptor::System(value)
  }
}

/// The `speak-as` descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpeakAs {
  Auto,
  Bullets,
  Numbers,
  Words,
  /// Speak the counter the way another counter style does.
  Reference(String),
}

/// The `range` descriptor.
///
/// Bounds are inclusive; `infinite` is represented by `i32::MIN` / `i32::MAX`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CounterRange {
  Auto,
  Bounds(Vec<(i32, i32)>),
}

/// Parsed @counter-style rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterStyleRule {
  pub name: String,
  pub system: Option<SystemDescriptor>,
  pub symbols: Option<Vec<String>>,
  pub additive_symbols: Option<Vec<(u32, String)>>,
  /// Negative prefix and suffix.
  pub negative: Option<(String, String)>,
  pub prefix: Option<String>,
  pub suffix: Option<String>,
  pub pad: Option<(u32, String)>,
  pub range: Option<CounterRange>,
  pub fallback: Option<String>,
  pub speak_as: Option<SpeakAs>,
}

impl Default for CounterStyleRule {
  fn default() -> Self {
    Self::new("")
  }
}

/// Where a rule comes from; internal systems are reserved for the user agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOrigin {
  UserAgent,
  Author,
}

/// Names no author rule may define.
const RESERVED_NAMES: &[&str] = &[
  "none",
  "decimal",
  "disc",
  "square",
  "circle",
  "disclosure-open",
  "disclosure-closed",
  "inherit",
  "initial",
  "unset",
  "revert",
  "revert-layer",
  "default",
];

impl CounterStyleRule {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      system: None,
      symbols: None,
      additive_symbols: None,
      negative: None,
      prefix: None,
      suffix: None,
      pad: None,
      range: None,
      fallback: None,
      speak_as: None,
    }
  }

  pub fn with_system(mut self, system: impl Into<SystemDescriptor>) -> Self {
    self.system = Some(system.into());
    self
  }

  pub fn extending(mut self, name: impl Into<String>) -> Self {
    self.system = Some(SystemDescriptor::Extends(name.into()));
    self
  }

  pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.symbols = Some(symbols.into_iter().map(Into::into).collect());
    self
  }

  pub fn with_additive_symbols<I, S>(mut self, symbols: I) -> Self
  where
    I: IntoIterator<Item = (u32, S)>,
    S: Into<String>,
  {
    self.additive_symbols = Some(
      symbols
        .into_iter()
        .map(|(weight, symbol)| (weight, symbol.into()))
        .collect(),
    );
    self
  }

  pub fn with_negative(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
    self.negative = Some((prefix.into(), suffix.into()));
    self
  }

  pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
    self.prefix = Some(prefix.into());
    self
  }

  pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
    self.suffix = Some(suffix.into());
    self
  }

  pub fn with_pad(mut self, length: u32, symbol: impl Into<String>) -> Self {
    self.pad = Some((length, symbol.into()));
    self
  }

  pub fn with_range(mut self, bounds: impl Into<Vec<(i32, i32)>>) -> Self {
    self.range = Some(CounterRange::Bounds(bounds.into()));
    self
  }

  pub fn with_fallback(mut self, name: impl Into<String>) -> Self {
    self.fallback = Some(name.into());
    self
  }

  pub fn with_speak_as(mut self, speak_as: SpeakAs) -> Self {
    self.speak_as = Some(speak_as);
    self
  }

  /// The target name of an `extends` system, if any.
  pub fn extends_name(&self) -> Option<&str> {
    match &self.system {
      Some(SystemDescriptor::Extends(name)) => Some(name),
      _ => None,
    }
  }

  /// The declared system; a missing `system` descriptor means `symbolic`.
  pub fn declared_system(&self) -> Option<CounterSystem> {
    match &self.system {
      Some(SystemDescriptor::System(system)) => Some(*system),
      Some(SystemDescriptor::Extends(_)) => None,
      None => Some(CounterSystem::Symbolic),
    }
  }

  /// Check that the rule defines a usable counter style.
  pub fn validate(&self, origin: RuleOrigin) -> Result<(), CounterStyleError> {
    let name = &self.name;
    if origin == RuleOrigin::Author
      && RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
    {
      return Err(CounterStyleError::ReservedName { name: name.clone() });
    }

    if let Some(CounterRange::Bounds(bounds)) = &self.range {
      if let Some((lower, upper)) = bounds.iter().find(|(lower, upper)| lower > upper) {
        return Err(CounterStyleError::InvalidRange {
          name: name.clone(),
          lower: *lower,
          upper: *upper,
        });
      }
    }

    let Some(system) = self.declared_system() else {
      if self.symbols.is_some() || self.additive_symbols.is_some() {
        return Err(CounterStyleError::ExtendsWithSymbols { name: name.clone() });
      }
      return Ok(());
    };

    if system.is_internal() {
      if origin == RuleOrigin::Author {
        return Err(CounterStyleError::InternalSystem {
          name: name.clone(),
          system: system.keyword(),
        });
      }
      return Ok(());
    }

    if system == CounterSystem::Additive {
      let symbols = self.additive_symbols.as_deref().unwrap_or_default();
      if symbols.is_empty() {
        return Err(CounterStyleError::NotEnoughSymbols {
          name: name.clone(),
          system: system.keyword(),
          required: 1,
          found: 0,
        });
      }
      if symbols.windows(2).any(|pair| pair[0].0 <= pair[1].0) {
        return Err(CounterStyleError::UnorderedAdditiveWeights { name: name.clone() });
      }
      return Ok(());
    }

    let required = match system {
      CounterSystem::Alphabetic | CounterSystem::Numeric => 2,
      _ => 1,
    };
    let found = self.symbols.as_ref().map_or(0, Vec::len);
    if found < required {
      return Err(CounterStyleError::NotEnoughSymbols {
        name: name.clone(),
        system: system.keyword(),
        required,
        found,
      });
    }
    Ok(())
  }
}
