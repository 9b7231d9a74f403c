use fastcounter::style::counter_style_map::CounterStyleMap;
use fastcounter::style::counter_styles::{CounterStyleRule, CounterSystem};

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

fn repr(map: &CounterStyleMap, name: &str, value: i32) -> String {
  map.find_counter_style(name).generate_representation(value)
}

#[test]
fn predefined_numeric_styles() {
  let map = CounterStyleMap::new();
  assert_eq!(repr(&map, "decimal", -7), "-7");
  assert_eq!(repr(&map, "decimal-leading-zero", 5), "05");
  assert_eq!(repr(&map, "decimal-leading-zero", -5), "-5");
  assert_eq!(repr(&map, "decimal-leading-zero", 123), "123");
  assert_eq!(repr(&map, "arabic-indic", 10), "\u{0661}\u{0660}");
  assert_eq!(repr(&map, "decimal", i32::MIN), "-2147483648");
}

#[test]
fn roman_numerals_stay_in_range() {
  let map = CounterStyleMap::new();
  assert_eq!(repr(&map, "upper-roman", 1994), "MCMXCIV");
  assert_eq!(repr(&map, "lower-roman", 3999), "mmmcmxcix");
  assert_eq!(repr(&map, "upper-roman", 4000), "4000");
  assert_eq!(repr(&map, "upper-roman", 0), "0");
  assert_eq!(repr(&map, "upper-roman", -3), "-3");
}

#[test]
fn alphabetic_styles_start_at_one() {
  let map = CounterStyleMap::new();
  assert_eq!(repr(&map, "lower-alpha", 1), "a");
  assert_eq!(repr(&map, "lower-alpha", 26), "z");
  assert_eq!(repr(&map, "lower-alpha", 27), "aa");
  assert_eq!(repr(&map, "lower-alpha", 0), "0");
  assert_eq!(repr(&map, "upper-latin", 703), "AAA");
  assert_eq!(repr(&map, "lower-greek", 25), "αα");
}

#[test]
fn hebrew_out_of_range_uses_decimal_with_hebrew_affixes() {
  let map = CounterStyleMap::new();
  let hebrew = map.find_counter_style("hebrew");
  assert_eq!(hebrew.generate_representation(15), "טו");
  assert_eq!(
    hebrew.generate_representation_with_prefix_and_suffix(1_000_000),
    "1000000. "
  );
}

#[test]
fn chinese_styles_fall_back_to_cjk_decimal() {
  let map = CounterStyleMap::new();
  let informal = map.find_counter_style("simp-chinese-informal");
  assert_eq!(informal.generate_representation(10), "十");
  assert_eq!(informal.generate_representation(-10), "负十");
  assert_eq!(informal.generate_representation(10000), "一〇〇〇〇");
  assert_eq!(informal.generate_representation_with_prefix_and_suffix(3), "三、");
  assert_eq!(repr(&map, "cjk-ideographic", 12), "十二");
  assert_eq!(repr(&map, "trad-chinese-formal", 12), "壹拾貳");
}

#[test]
fn japanese_and_korean_styles() {
  let map = CounterStyleMap::new();
  assert_eq!(repr(&map, "japanese-informal", 1234), "千二百三十四");
  assert_eq!(repr(&map, "japanese-informal", 0), "〇");
  assert_eq!(repr(&map, "japanese-informal", -5), "マイナス五");
  assert_eq!(repr(&map, "korean-hangul-formal", -1), "마이너스 일");
  assert_eq!(
    map
      .find_counter_style("korean-hangul-formal")
      .generate_representation_with_prefix_and_suffix(2),
    "이, "
  );
}

#[test]
fn fixed_cjk_cycles_fall_back_after_last_symbol() {
  let map = CounterStyleMap::new();
  assert_eq!(repr(&map, "cjk-earthly-branch", 1), "子");
  assert_eq!(repr(&map, "cjk-earthly-branch", 12), "亥");
  assert_eq!(repr(&map, "cjk-earthly-branch", 13), "一三");
  assert_eq!(repr(&map, "cjk-heavenly-stem", 0), "〇");
}

#[test]
fn other_algorithmic_scripts() {
  let map = CounterStyleMap::new();
  assert_eq!(repr(&map, "lower-armenian", 1), "ա");
  assert_eq!(repr(&map, "armenian", 0), "0");
  assert_eq!(repr(&map, "ethiopic-numeric", 100), "፻");
  assert_eq!(repr(&map, "georgian", 20000), "20000");
  assert_eq!(repr(&map, "georgian", 1), "ა");
}

#[test]
fn cyclic_and_fixed_ignore_negative_sign() {
  let map = CounterStyleMap::from_rules([
    CounterStyleRule::new("abc")
      .with_system(CounterSystem::Cyclic)
      .with_symbols(["a", "b", "c"]),
    CounterStyleRule::new("from-three")
      .with_system(CounterSystem::Fixed {
        first_symbol_value: 3,
      })
      .with_symbols(["a", "b"]),
  ]);
  assert_eq!(repr(&map, "abc", 1), "a");
  assert_eq!(repr(&map, "abc", 4), "a");
  assert_eq!(repr(&map, "abc", -1), "b");
  assert_eq!(repr(&map, "abc", 0), "c");
  assert_eq!(repr(&map, "from-three", 3), "a");
  assert_eq!(repr(&map, "from-three", 4), "b");
  assert_eq!(repr(&map, "from-three", 5), "5");
  assert_eq!(repr(&map, "from-three", -1), "-1");
}

#[test]
fn padding_sits_between_negative_prefix_and_digits() {
  let map = CounterStyleMap::from_rules([CounterStyleRule::new("padded")
    .with_system(CounterSystem::Numeric)
    .with_symbols(DIGITS)
    .with_negative("(", ")")
    .with_pad(5, "0")]);
  assert_eq!(repr(&map, "padded", 3), "00003");
  assert_eq!(repr(&map, "padded", -3), "(003)");
  assert_eq!(repr(&map, "padded", 123456), "123456");
}

#[test]
fn padding_counts_grapheme_clusters() {
  let map = CounterStyleMap::from_rules([CounterStyleRule::new("accented")
    .with_system(CounterSystem::Numeric)
    .with_symbols(["e\u{0301}", "x"])
    .with_pad(3, "_")]);
  assert_eq!(repr(&map, "accented", 2), "_xe\u{0301}");
  assert_eq!(repr(&map, "accented", 1), "__x");
}

#[test]
fn oversized_output_falls_back() {
  let map = CounterStyleMap::from_rules([
    CounterStyleRule::new("wide-pad")
      .with_system(CounterSystem::Numeric)
      .with_symbols(DIGITS)
      .with_pad(121, "0"),
    CounterStyleRule::new("max-pad")
      .with_system(CounterSystem::Numeric)
      .with_symbols(DIGITS)
      .with_pad(120, "0"),
    CounterStyleRule::new("stars")
      .with_system(CounterSystem::Symbolic)
      .with_symbols(["*"]),
    CounterStyleRule::new("tally")
      .with_system(CounterSystem::Additive)
      .with_additive_symbols([(1, "|")]),
  ]);
  assert_eq!(repr(&map, "wide-pad", 7), "7");
  let padded = repr(&map, "max-pad", 7);
  assert_eq!(padded.len(), 120);
  assert!(padded.ends_with("07"));
  assert_eq!(repr(&map, "stars", 120), "*".repeat(120));
  assert_eq!(repr(&map, "stars", 121), "121");
  assert_eq!(repr(&map, "tally", 3), "|||");
  assert_eq!(repr(&map, "tally", i32::MAX), i32::MAX.to_string());
}

#[test]
fn binary_numeric_handles_extreme_values() {
  let map = CounterStyleMap::from_rules([CounterStyleRule::new("binary")
    .with_system(CounterSystem::Numeric)
    .with_symbols(["0", "1"])]);
  assert_eq!(repr(&map, "binary", 0), "0");
  assert_eq!(repr(&map, "binary", 5), "101");
  assert_eq!(repr(&map, "binary", i32::MIN), format!("-1{}", "0".repeat(31)));
}
