use fastcounter::style::counter_style_map::CounterStyleMap;
use fastcounter::style::predefined::{self, NAMES};

#[test]
fn every_predefined_style_is_registered() {
  let ua = CounterStyleMap::user_agent();
  assert_eq!(ua.len(), NAMES.len());
  for &name in NAMES {
    let style = ua.get(name).unwrap_or_else(|| panic!("missing {}", name));
    assert_eq!(style.name(), name);
    assert!(style.style().is_predefined(), "{}", name);
    assert!(!style.style().has_inexistent_references(), "{}", name);
    assert!(!style.style().is_dirty(), "{}", name);
  }
}

#[test]
fn every_predefined_style_produces_text() {
  let map = CounterStyleMap::new();
  for &name in NAMES {
    let style = map.find_counter_style(name);
    assert_eq!(style.name(), name);
    for value in (-20..=60).chain([999, 1000, 9999, 10000, i32::MAX, i32::MIN]) {
      let representation = style.generate_representation(value);
      assert!(!representation.is_empty(), "{} {}", name, value);
      let marker = style.generate_representation_with_prefix_and_suffix(value);
      assert_eq!(
        marker,
        format!("{}{}{}", style.prefix(), representation, style.suffix()),
        "{} {}",
        name,
        value
      );
      assert!(!style.generate_text_alternative(value).is_empty());
    }
  }
}

#[test]
fn aliases_match_their_targets() {
  let map = CounterStyleMap::new();
  for (alias, target) in [
    ("khmer", "cambodian"),
    ("lower-latin", "lower-alpha"),
    ("upper-latin", "upper-alpha"),
    ("armenian", "upper-armenian"),
    ("cjk-ideographic", "trad-chinese-informal"),
  ] {
    let alias = map.find_counter_style(alias);
    let target = map.find_counter_style(target);
    for value in [1, 7, 42, 1234] {
      assert_eq!(
        alias.generate_representation(value),
        target.generate_representation(value)
      );
    }
  }
}

#[test]
fn bullets_ignore_the_counter_value() {
  let map = CounterStyleMap::new();
  for &name in predefined::SYMBOL_MARKERS {
    let style = map.find_counter_style(name);
    assert!(style.style().is_predefined_symbol_marker());
    assert_eq!(style.generate_representation(1), style.generate_representation(-9));
    assert_eq!(style.suffix(), " ");
  }
  assert_eq!(CounterStyleMap::disc().generate_representation(7), "\u{2022}");
  assert_eq!(CounterStyleMap::decimal().generate_representation(7), "7");
}
