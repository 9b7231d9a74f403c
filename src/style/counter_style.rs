//! Resolved counter styles and counter text generation.
//!
//! A [`CounterStyle`] is built from one [`CounterStyleRule`] and then completed
//! by its owning [`CounterStyleMap`], which resolves `extends`, `fallback` and
//! `speak-as` names into links. Generation goes through a
//! [`CounterStyleRef`], which pairs a style with the map that can follow its
//! links.
//!
//! See <https://drafts.csswg.org/css-counter-styles/#generate-a-counter>.

use crate::debug::runtime::CounterStyleConfig;
use crate::style::counter_algorithms as algorithms;
use crate::style::counter_style_map::CounterStyleMap;
use crate::style::counter_styles::{
  CounterRange, CounterStyleRule, CounterSystem, SpeakAs, SystemDescriptor,
};
use crate::style::predefined;
use log::trace;
use std::sync::atomic::{AtomicU64, Ordering};
use unicode_segmentation::UnicodeSegmentation;

/// Process-unique identity of a built counter style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CounterStyleId(u64);

impl CounterStyleId {
  fn next() -> Self {
    static NEXT_ID: AtomicU64 = AtomicU64::new(1);
    Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
  }
}

/// Which map a [`StyleLink`] points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LinkScope {
  /// The map owning the linking style.
  SameMap,
  /// The process-wide user-agent map.
  UserAgent,
}

/// Non-owning reference to another counter style, by normalized name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StyleLink {
  pub(crate) name: String,
  pub(crate) scope: LinkScope,
}

impl StyleLink {
  pub(crate) fn new(name: impl Into<String>, scope: LinkScope) -> Self {
    Self {
      name: name.into(),
      scope,
    }
  }
}

/// A counter style ready to generate counter text.
#[derive(Debug, Clone)]
pub struct CounterStyle {
  pub(crate) id: CounterStyleId,
  pub(crate) name: String,
  pub(crate) rule: CounterStyleRule,
  /// Version of `rule` in the owning map when this style was built.
  pub(crate) rule_version: u64,
  pub(crate) predefined: bool,

  pub(crate) system: CounterSystem,
  /// `extends` target still waiting for resolution.
  pub(crate) pending_extends: Option<String>,

  pub(crate) symbols: Vec<String>,
  /// Parallel to `symbols` for `additive` styles.
  pub(crate) additive_weights: Vec<u32>,
  pub(crate) negative_prefix: String,
  pub(crate) negative_suffix: String,
  pub(crate) prefix: String,
  pub(crate) suffix: String,
  pub(crate) pad_length: u32,
  pub(crate) pad_symbol: String,
  /// Empty means `auto`.
  pub(crate) range: Vec<(i32, i32)>,
  pub(crate) fallback_name: String,
  /// `speak-as` after `extends`, before references are checked.
  pub(crate) declared_speak_as: SpeakAs,
  /// `declared_speak_as`, or `auto` when its reference is dangling or cyclic.
  pub(crate) speak_as: SpeakAs,

  pub(crate) extended: Option<StyleLink>,
  pub(crate) fallback: Option<StyleLink>,
  pub(crate) speak_as_link: Option<StyleLink>,

  pub(crate) has_inexistent_references: bool,
  pub(crate) is_dirty: bool,
}

impl CounterStyle {
  /// Build a style from a validated rule, applying descriptor defaults.
  ///
  /// References stay unresolved until the owning map resolves them.
  pub(crate) fn new(
    name: impl Into<String>,
    rule: &CounterStyleRule,
    rule_version: u64,
    predefined: bool,
    config: &CounterStyleConfig,
  ) -> Self {
    let (system, pending_extends) = match &rule.system {
      Some(SystemDescriptor::Extends(target)) => (CounterSystem::Symbolic, Some(target.clone())),
      Some(SystemDescriptor::System(system)) => (*system, None),
      None => (CounterSystem::Symbolic, None),
    };

    let (symbols, additive_weights) = match (system, &rule.additive_symbols) {
      (CounterSystem::Additive, Some(tuples)) => tuples
        .iter()
        .map(|(weight, symbol)| (symbol.clone(), *weight))
        .unzip(),
      _ => (rule.symbols.clone().unwrap_or_default(), Vec::new()),
    };

    let (negative_prefix, negative_suffix) = rule
      .negative
      .clone()
      .unwrap_or_else(|| ("-".to_string(), String::new()));
    let (pad_length, pad_symbol) = rule.pad.clone().unwrap_or_default();
    let range = match &rule.range {
      Some(CounterRange::Bounds(bounds)) => bounds.clone(),
      Some(CounterRange::Auto) | None => Vec::new(),
    };
    let speak_as = if config.speak_as_enabled {
      rule.speak_as.clone().unwrap_or(SpeakAs::Auto)
    } else {
      SpeakAs::Auto
    };

    Self {
      id: CounterStyleId::next(),
      name: name.into(),
      rule: rule.clone(),
      rule_version,
      predefined,
      system,
      pending_extends,
      symbols,
      additive_weights,
      negative_prefix,
      negative_suffix,
      prefix: rule.prefix.clone().unwrap_or_default(),
      suffix: rule.suffix.clone().unwrap_or_else(|| ". ".to_string()),
      pad_length,
      pad_symbol,
      range,
      fallback_name: rule
        .fallback
        .clone()
        .unwrap_or_else(|| predefined::DECIMAL.to_string()),
      declared_speak_as: speak_as.clone(),
      speak_as,
      extended: None,
      fallback: None,
      speak_as_link: None,
      has_inexistent_references: false,
      is_dirty: false,
    }
  }

  /// Inherit the algorithm and every descriptor the own rule leaves unset.
  ///
  /// `extended` must itself have no pending `extends`.
  pub(crate) fn resolve_extends(&mut self, extended: &CounterStyle, link: StyleLink) {
    debug_assert!(extended.pending_extends.is_none());
    self.pending_extends = None;
    self.system = extended.system;
    self.symbols = extended.symbols.clone();
    self.additive_weights = extended.additive_weights.clone();

    let rule = &self.rule;
    if rule.fallback.is_none() {
      self.fallback_name = extended.fallback_name.clone();
    }
    if rule.negative.is_none() {
      self.negative_prefix = extended.negative_prefix.clone();
      self.negative_suffix = extended.negative_suffix.clone();
    }
    if rule.pad.is_none() {
      self.pad_length = extended.pad_length;
      self.pad_symbol = extended.pad_symbol.clone();
    }
    if rule.range.is_none() {
      self.range = extended.range.clone();
    }
    if rule.prefix.is_none() {
      self.prefix = extended.prefix.clone();
    }
    if rule.suffix.is_none() {
      self.suffix = extended.suffix.clone();
    }
    if rule.speak_as.is_none() {
      self.declared_speak_as = extended.declared_speak_as.clone();
      self.speak_as = extended.declared_speak_as.clone();
      self.speak_as_link = None;
    }
    self.extended = Some(link);
  }

  /// Forget the resolved `speak-as` reference ahead of resolving it again.
  pub(crate) fn reset_speak_as(&mut self) {
    self.speak_as = self.declared_speak_as.clone();
    self.speak_as_link = None;
  }

  /// Target name of the declared `speak-as` reference.
  pub(crate) fn speak_as_reference(&self) -> Option<&str> {
    match &self.declared_speak_as {
      SpeakAs::Reference(name) => Some(name),
      _ => None,
    }
  }

  /// A dangling or cyclic `speak-as` reference behaves as `auto`.
  pub(crate) fn resolve_invalid_speak_as(&mut self) {
    self.speak_as = SpeakAs::Auto;
    self.speak_as_link = None;
  }

  pub fn id(&self) -> CounterStyleId {
    self.id
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// The rule this style was built from.
  pub fn rule(&self) -> &CounterStyleRule {
    &self.rule
  }

  pub fn rule_version(&self) -> u64 {
    self.rule_version
  }

  pub fn is_predefined(&self) -> bool {
    self.predefined
  }

  pub fn system(&self) -> CounterSystem {
    self.system
  }

  pub fn symbols(&self) -> &[String] {
    &self.symbols
  }

  pub fn additive_weights(&self) -> &[u32] {
    &self.additive_weights
  }

  pub fn negative_prefix(&self) -> &str {
    &self.negative_prefix
  }

  pub fn negative_suffix(&self) -> &str {
    &self.negative_suffix
  }

  pub fn prefix(&self) -> &str {
    &self.prefix
  }

  pub fn suffix(&self) -> &str {
    &self.suffix
  }

  pub fn pad_length(&self) -> u32 {
    self.pad_length
  }

  pub fn pad_symbol(&self) -> &str {
    &self.pad_symbol
  }

  /// Explicit range bounds; empty means the system's `auto` range.
  pub fn range(&self) -> &[(i32, i32)] {
    &self.range
  }

  pub fn fallback_name(&self) -> &str {
    &self.fallback_name
  }

  /// The `speak-as` value after `extends` and validity resolution.
  pub fn speak_as(&self) -> &SpeakAs {
    &self.speak_as
  }

  /// Name of the style this one extends, once resolved.
  pub fn extended_name(&self) -> Option<&str> {
    self.extended.as_ref().map(|link| link.name.as_str())
  }

  pub fn has_inexistent_references(&self) -> bool {
    self.has_inexistent_references
  }

  pub fn is_dirty(&self) -> bool {
    self.is_dirty
  }

  /// Whether `value` lies in the style's range.
  pub fn range_contains(&self, value: i32) -> bool {
    if self.range.is_empty() {
      return self.system.auto_range_contains(value);
    }
    self
      .range
      .iter()
      .any(|&(lower, upper)| lower <= value && value <= upper)
  }

  pub fn needs_negative_sign(&self, value: i32) -> bool {
    value < 0 && self.system.uses_negative_sign()
  }

  /// One of the UA bullet styles, which speak as themselves.
  pub fn is_predefined_symbol_marker(&self) -> bool {
    self.predefined && predefined::SYMBOL_MARKERS.contains(&self.name.as_str())
  }

  /// Representation before negative sign and padding, or `None` when the
  /// value is outside the range or the system cannot represent it.
  fn initial_representation(&self, value: i32, length_limit: usize) -> Option<String> {
    if !self.range_contains(value) {
      return None;
    }

    let magnitude = value.unsigned_abs();
    let n = self.symbols.len();
    let indexes = match self.system {
      CounterSystem::Cyclic => algorithms::cyclic(value, n),
      CounterSystem::Fixed { first_symbol_value } => {
        algorithms::fixed(value, first_symbol_value, n)
      }
      CounterSystem::Symbolic => algorithms::symbolic(magnitude, n, length_limit),
      CounterSystem::Alphabetic => algorithms::alphabetic(magnitude, n),
      CounterSystem::Numeric => algorithms::numeric(magnitude, n),
      CounterSystem::Additive => {
        algorithms::additive(magnitude, &self.additive_weights, length_limit)
      }
      CounterSystem::Hebrew => return algorithms::hebrew(magnitude),
      CounterSystem::Cjk(variant) => return Some(algorithms::cjk_ideographic(magnitude, variant)),
      CounterSystem::Armenian(case) => return algorithms::armenian(magnitude, case),
      CounterSystem::EthiopicNumeric => return algorithms::ethiopic_numeric(magnitude),
    }?;
    self.indexes_to_string(&indexes)
  }

  fn indexes_to_string(&self, indexes: &[usize]) -> Option<String> {
    if indexes.is_empty() {
      return None;
    }
    let mut out = String::new();
    for &index in indexes {
      out.push_str(self.symbols.get(index)?);
    }
    Some(out)
  }
}

fn grapheme_count(text: &str) -> usize {
  text.graphemes(true).count()
}

/// State of one top-level generation call.
struct Generation {
  length_limit: usize,
  /// Styles currently generating through their fallback.
  in_fallback: Vec<CounterStyleId>,
}

impl Generation {
  fn new(config: &CounterStyleConfig) -> Self {
    Self {
      length_limit: config.length_limit,
      in_fallback: Vec::new(),
    }
  }

  fn enter_fallback(&mut self, id: CounterStyleId) -> FallbackScope<'_> {
    self.in_fallback.push(id);
    FallbackScope { generation: self }
  }
}

/// Marks a style as generating through its fallback until dropped.
struct FallbackScope<'g> {
  generation: &'g mut Generation,
}

impl Drop for FallbackScope<'_> {
  fn drop(&mut self) {
    self.generation.in_fallback.pop();
  }
}

// Bound on `speak-as` reference hops followed at generation time.
const MAX_SPEAK_AS_DEPTH: usize = 16;

/// A counter style together with the map that resolves its links.
#[derive(Debug, Clone, Copy)]
pub struct CounterStyleRef<'a> {
  map: &'a CounterStyleMap,
  style: &'a CounterStyle,
}

impl<'a> CounterStyleRef<'a> {
  pub(crate) fn new(map: &'a CounterStyleMap, style: &'a CounterStyle) -> Self {
    debug_assert!(
      !style.is_dirty,
      "counter style '{}' used before the map was updated",
      style.name
    );
    Self { map, style }
  }

  /// The underlying resolved style.
  pub fn style(&self) -> &'a CounterStyle {
    self.style
  }

  pub fn name(&self) -> &'a str {
    &self.style.name
  }

  pub fn prefix(&self) -> &'a str {
    &self.style.prefix
  }

  pub fn suffix(&self) -> &'a str {
    &self.style.suffix
  }

  /// The style this one extends.
  pub fn extended_style(&self) -> Option<CounterStyleRef<'a>> {
    self
      .style
      .extended
      .as_ref()
      .map(|link| self.map.follow_link(link))
  }

  pub fn fallback_style(&self) -> CounterStyleRef<'a> {
    match &self.style.fallback {
      Some(link) => self.map.follow_link(link),
      None => CounterStyleMap::decimal(),
    }
  }

  /// Counter representation without prefix and suffix.
  pub fn generate_representation(&self, value: i32) -> String {
    let config = CounterStyleConfig::current();
    let mut generation = Generation::new(&config);
    self.generate(value, &mut generation)
  }

  /// Marker text: `prefix + representation + suffix`.
  pub fn generate_representation_with_prefix_and_suffix(&self, value: i32) -> String {
    let representation = self.generate_representation(value);
    let mut out =
      String::with_capacity(self.style.prefix.len() + representation.len() + self.style.suffix.len());
    out.push_str(&self.style.prefix);
    out.push_str(&representation);
    out.push_str(&self.style.suffix);
    out
  }

  /// Text for `counters()`: representations of the nested values, outermost
  /// first, joined by `separator`.
  pub fn generate_counters_text(&self, values: &[i32], separator: &str) -> String {
    let config = CounterStyleConfig::current();
    let mut out = String::new();
    for (i, &value) in values.iter().enumerate() {
      if i > 0 {
        out.push_str(separator);
      }
      let mut generation = Generation::new(&config);
      out.push_str(&self.generate(value, &mut generation));
    }
    out
  }

  fn generate(&self, value: i32, generation: &mut Generation) -> String {
    let style = self.style;
    if style.pad_length as usize > generation.length_limit {
      return self.generate_fallback(value, generation);
    }

    let Some(initial) = style.initial_representation(value, generation.length_limit) else {
      return self.generate_fallback(value, generation);
    };

    let negative = style.needs_negative_sign(value);
    let mut length = grapheme_count(&initial);
    if negative {
      length += grapheme_count(&style.negative_prefix) + grapheme_count(&style.negative_suffix);
    }
    let pad_copies = (style.pad_length as usize).saturating_sub(length);

    let mut out = String::with_capacity(initial.len() + pad_copies * style.pad_symbol.len() + 8);
    if negative {
      out.push_str(&style.negative_prefix);
    }
    for _ in 0..pad_copies {
      out.push_str(&style.pad_symbol);
    }
    out.push_str(&initial);
    if negative {
      out.push_str(&style.negative_suffix);
    }
    out
  }

  fn generate_fallback(&self, value: i32, generation: &mut Generation) -> String {
    if generation.in_fallback.contains(&self.style.id) {
      trace!(
        "counter style '{}' re-entered its fallback chain; using decimal for {}",
        self.style.name,
        value
      );
      return CounterStyleMap::decimal().generate(value, generation);
    }

    let fallback = self.fallback_style();
    trace!(
      "counter style '{}' cannot represent {}; falling back to '{}'",
      self.style.name,
      value,
      fallback.name()
    );
    let scope = generation.enter_fallback(self.style.id);
    fallback.generate(value, &mut *scope.generation)
  }

  /// `speak-as` with `auto` and references resolved.
  pub fn effective_speak_as(&self) -> SpeakAs {
    let mut current = *self;
    for _ in 0..MAX_SPEAK_AS_DEPTH {
      let style: &'a CounterStyle = current.style;
      match &style.speak_as {
        SpeakAs::Auto => return style.system.auto_speak_as(),
        SpeakAs::Reference(_) => match current.speak_as_style() {
          Some(next) => current = next,
          None => return style.system.auto_speak_as(),
        },
        other => return other.clone(),
      }
    }
    self.style.system.auto_speak_as()
  }

  fn speak_as_style(&self) -> Option<CounterStyleRef<'a>> {
    self
      .style
      .speak_as_link
      .as_ref()
      .map(|link| self.map.follow_link(link))
  }

  /// Text for speech and accessibility trees.
  pub fn generate_text_alternative(&self, value: i32) -> String {
    if !CounterStyleConfig::current().speak_as_enabled {
      return self.generate_representation_with_prefix_and_suffix(value);
    }

    let text = self.text_alternative_without_affixes(value, 0);
    if self.effective_speak_as() == SpeakAs::Bullets {
      return text + " ";
    }
    format!("{}{}{}", self.style.prefix, text, self.style.suffix)
  }

  fn text_alternative_without_affixes(&self, value: i32, depth: usize) -> String {
    if let SpeakAs::Reference(_) = &self.style.speak_as {
      if depth < MAX_SPEAK_AS_DEPTH {
        if let Some(referenced) = self.speak_as_style() {
          return referenced.text_alternative_without_affixes(value, depth + 1);
        }
      }
    }

    match self.effective_speak_as() {
      SpeakAs::Numbers => CounterStyleMap::decimal().generate_representation(value),
      SpeakAs::Bullets if self.style.is_predefined_symbol_marker() => {
        self.generate_representation(value)
      }
      SpeakAs::Bullets => CounterStyleMap::disc().generate_representation(value),
      _ => self.generate_representation(value),
    }
  }
}
