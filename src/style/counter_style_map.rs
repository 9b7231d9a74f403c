//! Per-scope registries of counter styles.
//!
//! A [`CounterStyleMap`] owns the `@counter-style` rules of one scope and the
//! [`CounterStyle`]s built from them. Styles reference each other by name;
//! [`CounterStyleMap::update`] resolves those names against the map itself and
//! then against the process-wide user-agent map, and rebuilds styles whose
//! rules or dependencies changed since the last update.
//!
//! Mutations (`add_rule`, `edit_rule`, `remove_rule`) only record the new
//! rule. Call [`CounterStyleMap::update`] before generating counter text.

use crate::debug::runtime::CounterStyleConfig;
use crate::error::{CounterStyleError, Result};
use crate::style::counter_style::{CounterStyle, CounterStyleRef, LinkScope, StyleLink};
use crate::style::counter_styles::{CounterStyleName, CounterStyleRule, RuleOrigin, SpeakAs};
use crate::style::predefined;
use log::{debug, trace, warn};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::OnceLock;

#[derive(Debug, Clone)]
struct RuleSlot {
  rule: CounterStyleRule,
  version: u64,
}

/// Map key for a style name: user-agent names are lowercased, others kept.
pub fn style_key(name: &str) -> String {
  CounterStyleName::parse(name).as_css_name().to_string()
}

enum ChainEnd {
  Resolved(StyleLink),
  /// Index in the chain where a cycle starts.
  Cycle(usize),
  Missing(String),
}

/// Counter styles defined in one scope.
#[derive(Debug, Clone)]
pub struct CounterStyleMap {
  origin: RuleOrigin,
  rules: FxHashMap<String, RuleSlot>,
  styles: FxHashMap<String, CounterStyle>,
  next_version: u64,
  needs_update: bool,
}

impl Default for CounterStyleMap {
  fn default() -> Self {
    Self::new()
  }
}

impl CounterStyleMap {
  /// An empty author map.
  pub fn new() -> Self {
    Self::with_origin(RuleOrigin::Author)
  }

  fn with_origin(origin: RuleOrigin) -> Self {
    Self {
      origin,
      rules: FxHashMap::default(),
      styles: FxHashMap::default(),
      next_version: 0,
      needs_update: false,
    }
  }

  /// The process-wide map of predefined counter styles.
  pub fn user_agent() -> &'static CounterStyleMap {
    static USER_AGENT: OnceLock<CounterStyleMap> = OnceLock::new();
    USER_AGENT.get_or_init(|| {
      let mut map = CounterStyleMap::with_origin(RuleOrigin::UserAgent);
      for rule in predefined::rules() {
        if let Err(err) = map.add_rule(rule) {
          warn!("invalid user-agent counter style: {}", err);
        }
      }
      map.update();
      map
    })
  }

  /// The predefined `decimal` style.
  pub fn decimal() -> CounterStyleRef<'static> {
    let map = Self::user_agent();
    let style = map
      .styles
      .get(predefined::DECIMAL)
      .unwrap_or_else(standalone_decimal);
    CounterStyleRef::new(map, style)
  }

  /// The predefined `disc` style.
  pub fn disc() -> CounterStyleRef<'static> {
    Self::user_agent()
      .get(predefined::DISC)
      .unwrap_or_else(Self::decimal)
  }

  /// Build an author map from rules, skipping invalid ones.
  pub fn from_rules<I>(rules: I) -> Self
  where
    I: IntoIterator<Item = CounterStyleRule>,
  {
    let mut map = Self::new();
    for rule in rules {
      if let Err(err) = map.add_rule(rule) {
        warn!("ignoring @counter-style rule: {}", err);
      }
    }
    map.update();
    map
  }

  /// Build an author map from a JSON array of rules.
  ///
  /// # Examples
  ///
  /// ```
  /// use fastcounter::style::counter_style_map::CounterStyleMap;
  ///
  /// let map = CounterStyleMap::from_json(
  ///   r#"[{ "name": "stars", "system": { "system": "symbolic" }, "symbols": ["*"] }]"#,
  /// )?;
  /// assert_eq!(map.find_counter_style("stars").generate_representation(3), "***");
  /// # Ok::<(), fastcounter::Error>(())
  /// ```
  pub fn from_json(json: &str) -> Result<Self> {
    let rules: Vec<CounterStyleRule> = serde_json::from_str(json)?;
    Ok(Self::from_rules(rules))
  }

  /// Insert or replace the rule with `rule.name`.
  pub fn add_rule(&mut self, rule: CounterStyleRule) -> std::result::Result<(), CounterStyleError> {
    rule.validate(self.origin)?;
    let key = style_key(&rule.name);
    self.next_version += 1;
    self.rules.insert(
      key,
      RuleSlot {
        rule,
        version: self.next_version,
      },
    );
    self.needs_update = true;
    Ok(())
  }

  /// Mutate an existing rule in place.
  ///
  /// The edited rule is validated again and keeps its name; an invalid edit
  /// leaves the previous rule untouched.
  pub fn edit_rule<F>(&mut self, name: &str, edit: F) -> std::result::Result<(), CounterStyleError>
  where
    F: FnOnce(&mut CounterStyleRule),
  {
    let Some(slot) = self.rules.get_mut(&style_key(name)) else {
      return Err(CounterStyleError::UnknownRule {
        name: name.to_string(),
      });
    };
    let mut edited = slot.rule.clone();
    edit(&mut edited);
    edited.name = slot.rule.name.clone();
    edited.validate(self.origin)?;
    self.next_version += 1;
    slot.rule = edited;
    slot.version = self.next_version;
    self.needs_update = true;
    Ok(())
  }

  pub fn remove_rule(&mut self, name: &str) -> Option<CounterStyleRule> {
    let removed = self.rules.remove(&style_key(name))?;
    self.needs_update = true;
    Some(removed.rule)
  }

  pub fn rule(&self, name: &str) -> Option<&CounterStyleRule> {
    self.rules.get(&style_key(name)).map(|slot| &slot.rule)
  }

  /// Whether rules changed since the last [`update`](Self::update).
  pub fn needs_update(&self) -> bool {
    self.needs_update
  }

  pub fn len(&self) -> usize {
    self.rules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rules.is_empty()
  }

  /// Names of the styles defined in this map.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.rules.keys().map(String::as_str)
  }

  /// Whether the built style called `name` is marked dirty.
  pub fn is_dirty(&self, name: &str) -> bool {
    self
      .styles
      .get(&style_key(name))
      .is_some_and(|style| style.is_dirty)
  }

  /// Mark every style whose rule changed, or whose `extends` or `fallback`
  /// dependency is dirty, as dirty.
  ///
  /// A style reached again while its own dependencies are still being walked
  /// reports its state so far, so passes repeat until no style changes.
  pub fn mark_dirty_counter_styles(&mut self) {
    let mut dirty = FxHashSet::default();
    let mut names: Vec<&String> = self.styles.keys().collect();
    names.sort();
    loop {
      let before = dirty.len();
      let mut visited = FxHashSet::default();
      for name in &names {
        self.traverse_and_mark_dirty(name, &mut visited, &mut dirty);
      }
      if dirty.len() == before {
        break;
      }
    }
    for name in dirty {
      if let Some(style) = self.styles.get_mut(&name) {
        if !style.is_dirty {
          trace!("counter style '{}' marked dirty", name);
          style.is_dirty = true;
        }
      }
    }
  }

  fn traverse_and_mark_dirty(
    &self,
    name: &str,
    visited: &mut FxHashSet<String>,
    dirty: &mut FxHashSet<String>,
  ) -> bool {
    // A style that no longer exists forces its dependents to be rebuilt.
    let Some(style) = self.styles.get(name) else {
      return true;
    };
    if style.predefined {
      return false;
    }
    if !visited.insert(name.to_string()) {
      return style.is_dirty || dirty.contains(name);
    }
    if dirty.contains(name) {
      return true;
    }

    let current_version = self.rules.get(name).map(|slot| slot.version);
    if style.is_dirty
      || style.has_inexistent_references
      || current_version != Some(style.rule_version)
    {
      dirty.insert(name.to_string());
      return true;
    }

    for link in [&style.extended, &style.fallback].into_iter().flatten() {
      if self.link_is_dirty(link, visited, dirty) {
        dirty.insert(name.to_string());
        return true;
      }
    }
    false
  }

  fn link_is_dirty(
    &self,
    link: &StyleLink,
    visited: &mut FxHashSet<String>,
    dirty: &mut FxHashSet<String>,
  ) -> bool {
    match link.scope {
      LinkScope::SameMap => self.traverse_and_mark_dirty(&link.name, visited, dirty),
      // An author rule now shadows the user-agent style.
      LinkScope::UserAgent => self.rules.contains_key(&link.name),
    }
  }

  /// Rebuild dirty styles, build styles for new rules and resolve their
  /// references.
  pub fn update(&mut self) {
    self.mark_dirty_counter_styles();

    let rules = &self.rules;
    self
      .styles
      .retain(|name, style| !style.is_dirty && rules.contains_key(name));

    let config = CounterStyleConfig::current();
    let predefined = self.origin == RuleOrigin::UserAgent;
    let mut rebuilt: Vec<String> = self
      .rules
      .keys()
      .filter(|name| !self.styles.contains_key(*name))
      .cloned()
      .collect();
    rebuilt.sort();

    for name in &rebuilt {
      if let Some(slot) = self.rules.get(name) {
        let style = CounterStyle::new(name.clone(), &slot.rule, slot.version, predefined, &config);
        self.styles.insert(name.clone(), style);
      }
    }

    for name in &rebuilt {
      self.resolve_extends_for(name);
    }
    for name in &rebuilt {
      self.resolve_fallback_for(name);
    }
    self.resolve_speak_as_references();

    if !rebuilt.is_empty() {
      trace!("rebuilt {} counter style(s)", rebuilt.len());
    }
    self.needs_update = false;
  }

  /// Where `name` resolves from this scope.
  fn find_link(&self, name: &str) -> Option<StyleLink> {
    let key = style_key(name);
    if self.styles.contains_key(&key) {
      return Some(StyleLink::new(key, LinkScope::SameMap));
    }
    if self.origin == RuleOrigin::Author && Self::user_agent().styles.contains_key(&key) {
      return Some(StyleLink::new(key, LinkScope::UserAgent));
    }
    None
  }

  fn decimal_link(&self) -> StyleLink {
    match self.origin {
      RuleOrigin::UserAgent => StyleLink::new(predefined::DECIMAL, LinkScope::SameMap),
      RuleOrigin::Author => StyleLink::new(predefined::DECIMAL, LinkScope::UserAgent),
    }
  }

  fn style_for_link(&self, link: &StyleLink) -> Option<&CounterStyle> {
    match link.scope {
      LinkScope::SameMap => self.styles.get(&link.name),
      LinkScope::UserAgent => Self::user_agent().styles.get(&link.name),
    }
  }

  fn resolve_extends_with(&mut self, name: &str, link: StyleLink) {
    let Some(mut style) = self.styles.remove(name) else {
      return;
    };
    match self.style_for_link(&link) {
      Some(extended) => style.resolve_extends(extended, link),
      None => {
        let decimal_link = self.decimal_link();
        let decimal = self
          .style_for_link(&decimal_link)
          .unwrap_or_else(|| standalone_decimal());
        style.resolve_extends(decimal, decimal_link);
      }
    }
    self.styles.insert(name.to_string(), style);
  }

  /// Follow the `extends` chain starting at `name` and resolve it from the
  /// far end back.
  fn resolve_extends_for(&mut self, name: &str) {
    let Some(mut target) = self
      .styles
      .get(name)
      .and_then(|style| style.pending_extends.clone())
    else {
      return;
    };

    let mut chain = vec![name.to_string()];
    let end = loop {
      let Some(link) = self.find_link(&target) else {
        break ChainEnd::Missing(target);
      };
      if link.scope == LinkScope::SameMap {
        if let Some(start) = chain.iter().position(|member| *member == link.name) {
          break ChainEnd::Cycle(start);
        }
        let next = self
          .styles
          .get(&link.name)
          .and_then(|style| style.pending_extends.clone());
        if let Some(next) = next {
          chain.push(link.name);
          target = next;
          continue;
        }
      }
      break ChainEnd::Resolved(link);
    };

    let mut base = match end {
      ChainEnd::Resolved(link) => link,
      ChainEnd::Missing(target) => {
        let Some(last) = chain.pop() else {
          return;
        };
        debug!(
          "counter style '{}' extends unknown style '{}'; extending decimal",
          last, target
        );
        let decimal = self.decimal_link();
        self.resolve_extends_with(&last, decimal);
        if let Some(style) = self.styles.get_mut(&last) {
          style.has_inexistent_references = true;
        }
        StyleLink::new(last, LinkScope::SameMap)
      }
      ChainEnd::Cycle(start) => {
        let cycle = chain.split_off(start);
        debug!(
          "counter styles {:?} form an extends cycle; extending decimal",
          cycle
        );
        for member in &cycle {
          let decimal = self.decimal_link();
          self.resolve_extends_with(member, decimal);
        }
        StyleLink::new(cycle[0].clone(), LinkScope::SameMap)
      }
    };

    while let Some(member) = chain.pop() {
      self.resolve_extends_with(&member, base);
      base = StyleLink::new(member, LinkScope::SameMap);
    }
  }

  fn resolve_fallback_for(&mut self, name: &str) {
    let Some(fallback_name) = self
      .styles
      .get(name)
      .map(|style| style.fallback_name.clone())
    else {
      return;
    };
    let link = self.find_link(&fallback_name);
    let decimal = self.decimal_link();
    let Some(style) = self.styles.get_mut(name) else {
      return;
    };
    match link {
      Some(link) => style.fallback = Some(link),
      None => {
        debug!(
          "counter style '{}' falls back to unknown style '{}'; using decimal",
          name, fallback_name
        );
        style.fallback = Some(decimal);
        style.has_inexistent_references = true;
      }
    }
  }

  /// Point every `speak-as` reference at its direct target.
  ///
  /// Runs over all styles, rebuilt or not: a clean style's target may have
  /// been edited, removed or shadowed since the last update.
  fn resolve_speak_as_references(&mut self) {
    let mut names: Vec<String> = self
      .styles
      .iter()
      .filter(|(_, style)| style.speak_as_reference().is_some())
      .map(|(name, _)| name.clone())
      .collect();
    names.sort();

    let resolved: Vec<(String, Option<StyleLink>)> = names
      .into_iter()
      .map(|name| {
        let link = self.speak_as_target(&name);
        (name, link)
      })
      .collect();

    for (name, link) in resolved {
      let Some(style) = self.styles.get_mut(&name) else {
        continue;
      };
      style.reset_speak_as();
      match link {
        Some(link) => style.speak_as_link = Some(link),
        None => style.resolve_invalid_speak_as(),
      }
    }
  }

  /// Direct `speak-as` target of `name`, or `None` when the reference is
  /// dangling or leads back to `name`.
  fn speak_as_target(&mut self, name: &str) -> Option<StyleLink> {
    let target = self.styles.get(name)?.speak_as_reference()?.to_string();
    let Some(link) = self.find_link(&target) else {
      debug!(
        "counter style '{}' speaks as unknown style '{}'; using auto",
        name, target
      );
      if let Some(style) = self.styles.get_mut(name) {
        style.has_inexistent_references = true;
      }
      return None;
    };

    let mut seen = FxHashSet::default();
    let mut next = Some(link.clone());
    while let Some(current) = next.take() {
      if current.scope != LinkScope::SameMap || !seen.insert(current.name.clone()) {
        break;
      }
      if current.name == name {
        debug!("counter style '{}' is part of a speak-as cycle; using auto", name);
        return None;
      }
      next = self
        .styles
        .get(&current.name)
        .and_then(|style| style.speak_as_reference())
        .and_then(|target| self.find_link(target));
    }
    Some(link)
  }

  /// The style named `name` defined in this map.
  pub fn get(&self, name: &str) -> Option<CounterStyleRef<'_>> {
    self
      .styles
      .get(&style_key(name))
      .map(|style| CounterStyleRef::new(self, style))
  }

  /// Look `name` up in this map, then in the user-agent map; unknown names
  /// resolve to `decimal`.
  pub fn find_counter_style(&self, name: &str) -> CounterStyleRef<'_> {
    debug_assert!(
      !self.needs_update,
      "counter style map used before update()"
    );
    if let Some(found) = self.get(name) {
      return found;
    }
    if self.origin == RuleOrigin::Author {
      if let Some(found) = Self::user_agent().get(name) {
        return found;
      }
    }
    Self::decimal()
  }

  pub(crate) fn follow_link(&self, link: &StyleLink) -> CounterStyleRef<'_> {
    let map = match link.scope {
      LinkScope::SameMap => self,
      LinkScope::UserAgent => Self::user_agent(),
    };
    map.get(&link.name).unwrap_or_else(|| Self::decimal())
  }

  /// Marker text (`prefix + representation + suffix`) for a list item.
  pub fn counter_text(&self, name: &CounterStyleName, value: i32) -> String {
    match name {
      CounterStyleName::None => String::new(),
      name => self
        .find_counter_style(name.as_css_name())
        .generate_representation_with_prefix_and_suffix(value),
    }
  }

  /// Text of `counters(<name>, separator, <style>)`.
  pub fn counters_text(&self, name: &CounterStyleName, values: &[i32], separator: &str) -> String {
    match name {
      CounterStyleName::None => String::new(),
      name => self
        .find_counter_style(name.as_css_name())
        .generate_counters_text(values, separator),
    }
  }

  /// Spoken form of a list item marker.
  pub fn counter_text_alternative(&self, name: &CounterStyleName, value: i32) -> String {
    match name {
      CounterStyleName::None => String::new(),
      name => self
        .find_counter_style(name.as_css_name())
        .generate_text_alternative(value),
    }
  }
}

/// `decimal` built outside any map, for when the user-agent map lacks it.
fn standalone_decimal() -> &'static CounterStyle {
  static DECIMAL: OnceLock<CounterStyle> = OnceLock::new();
  DECIMAL.get_or_init(|| {
    CounterStyle::new(
      predefined::DECIMAL,
      &predefined::decimal_rule(),
      0,
      true,
      &CounterStyleConfig::default(),
    )
  })
}
