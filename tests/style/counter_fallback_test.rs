use fastcounter::style::counter_style_map::CounterStyleMap;
use fastcounter::style::counter_styles::{CounterStyleRule, CounterSystem};

fn only(name: &str, symbol: &str) -> CounterStyleRule {
  CounterStyleRule::new(name)
    .with_system(CounterSystem::FIXED)
    .with_symbols([symbol])
}

#[test]
fn mutual_fallback_cycle_ends_in_decimal() {
  let map = CounterStyleMap::from_rules([
    only("a", "x").with_fallback("b"),
    only("b", "y").with_fallback("a"),
  ]);
  let a = map.find_counter_style("a");
  let b = map.find_counter_style("b");
  assert_eq!(a.fallback_style().name(), "b");
  assert_eq!(b.fallback_style().name(), "a");
  assert_eq!(a.generate_representation(5), "5");
  assert_eq!(b.generate_representation(-5), "-5");
  // The cycle guard is per call.
  assert_eq!(a.generate_representation(1), "x");
  assert_eq!(b.generate_representation(1), "y");
  assert!(!a.style().has_inexistent_references());
}

#[test]
fn self_fallback_ends_in_decimal() {
  let map = CounterStyleMap::from_rules([only("loop", "x").with_fallback("loop")]);
  assert_eq!(map.find_counter_style("loop").generate_representation(2), "2");
}

#[test]
fn dangling_fallback_uses_decimal() {
  let map = CounterStyleMap::from_rules([only("lonely", "x").with_fallback("nowhere")]);
  let lonely = map.find_counter_style("lonely");
  assert_eq!(lonely.fallback_style().name(), "decimal");
  assert!(lonely.style().has_inexistent_references());
  assert_eq!(lonely.style().fallback_name(), "nowhere");
  assert_eq!(lonely.generate_representation(3), "3");
}

#[test]
fn fallback_resolves_to_user_agent_style() {
  let map = CounterStyleMap::from_rules([only("first", "x").with_fallback("upper-roman")]);
  let first = map.find_counter_style("first");
  assert_eq!(first.fallback_style().name(), "upper-roman");
  assert_eq!(first.generate_representation(4), "IV");
  // upper-roman itself falls back to decimal.
  assert_eq!(first.generate_representation(5000), "5000");
}

#[test]
fn fallback_uses_outer_prefix_and_suffix() {
  let map = CounterStyleMap::from_rules([
    only("outer", "x")
      .with_prefix("<")
      .with_suffix(">")
      .with_fallback("inner"),
    CounterStyleRule::new("inner")
      .with_system(CounterSystem::Numeric)
      .with_symbols(["0", "1"])
      .with_prefix("[")
      .with_suffix("]"),
  ]);
  let outer = map.find_counter_style("outer");
  assert_eq!(outer.generate_representation_with_prefix_and_suffix(1), "<x>");
  assert_eq!(outer.generate_representation_with_prefix_and_suffix(2), "<10>");
}

#[test]
fn explicit_range_triggers_fallback() {
  let map = CounterStyleMap::from_rules([
    CounterStyleRule::new("small")
      .with_system(CounterSystem::Numeric)
      .with_symbols(["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"])
      .with_range([(1, 10)])
      .with_fallback("lower-roman"),
    CounterStyleRule::new("split")
      .with_system(CounterSystem::Numeric)
      .with_symbols(["0", "1"])
      .with_range([(0, 2), (10, 12)]),
  ]);
  let small = map.find_counter_style("small");
  assert!(small.style().range_contains(10));
  assert!(!small.style().range_contains(11));
  assert_eq!(small.generate_representation(10), "10");
  assert_eq!(small.generate_representation(11), "xi");
  // Outside lower-roman's range too.
  assert_eq!(small.generate_representation(0), "0");
  assert_eq!(small.generate_representation(-3), "-3");

  let split = map.find_counter_style("split");
  assert_eq!(split.generate_representation(2), "10");
  assert_eq!(split.generate_representation(5), "5");
  assert_eq!(split.generate_representation(11), "1011");
}

#[test]
fn fallback_changes_with_rule_edits() {
  let mut map = CounterStyleMap::from_rules([
    only("item", "x").with_fallback("target"),
    only("target", "t").with_fallback("decimal"),
  ]);
  assert_eq!(map.find_counter_style("item").generate_representation(1), "x");
  assert_eq!(map.find_counter_style("item").generate_representation(2), "2");

  map
    .edit_rule("target", |rule| {
      rule.system = Some(CounterSystem::Symbolic.into());
      rule.symbols = Some(vec!["t".to_string()]);
    })
    .expect("edit");
  map.update();
  assert_eq!(map.find_counter_style("item").generate_representation(2), "tt");

  map.remove_rule("target");
  map.update();
  let item = map.find_counter_style("item");
  assert_eq!(item.fallback_style().name(), "decimal");
  assert!(item.style().has_inexistent_references());

  map.add_rule(only("target", "t")).expect("add");
  map.update();
  let item = map.find_counter_style("item");
  assert_eq!(item.fallback_style().name(), "target");
  assert!(!item.style().has_inexistent_references());
}
