use fastcounter::style::counter_style_map::CounterStyleMap;
use fastcounter::style::counter_styles::{CounterStyleRule, CounterSystem, SpeakAs};

fn binary(name: &str) -> CounterStyleRule {
  CounterStyleRule::new(name)
    .with_system(CounterSystem::Numeric)
    .with_symbols(["0", "1"])
}

fn cyclic(name: &str, symbol: &str) -> CounterStyleRule {
  CounterStyleRule::new(name)
    .with_system(CounterSystem::Cyclic)
    .with_symbols([symbol])
}

fn spoken(map: &CounterStyleMap, name: &str, value: i32) -> String {
  map.find_counter_style(name).generate_text_alternative(value)
}

#[test]
fn auto_follows_the_system() {
  let map = CounterStyleMap::from_rules([cyclic("diamond", "\u{25C6}")]);
  assert_eq!(spoken(&map, "decimal", 3), "3. ");
  assert_eq!(spoken(&map, "upper-roman", 4), "4. ");
  assert_eq!(spoken(&map, "lower-alpha", 3), "c. ");
  assert_eq!(spoken(&map, "disc", 3), "\u{2022} ");
  assert_eq!(spoken(&map, "square", 1), "\u{25AA} ");
  // Author bullets are spoken as a disc.
  assert_eq!(spoken(&map, "diamond", 3), "\u{2022} ");
  assert_eq!(
    map.find_counter_style("diamond").effective_speak_as(),
    SpeakAs::Bullets
  );
}

#[test]
fn explicit_modes_override_the_system() {
  let map = CounterStyleMap::from_rules([
    binary("worded").with_speak_as(SpeakAs::Words),
    cyclic("counted", "a")
      .with_suffix(")")
      .with_speak_as(SpeakAs::Numbers),
    CounterStyleRule::new("dotted")
      .with_system(CounterSystem::Alphabetic)
      .with_symbols(["a", "b"])
      .with_speak_as(SpeakAs::Bullets),
  ]);
  assert_eq!(spoken(&map, "worded", 3), "11. ");
  assert_eq!(spoken(&map, "counted", 3), "3)");
  assert_eq!(spoken(&map, "dotted", 3), "\u{2022} ");
}

#[test]
fn reference_speaks_like_the_referenced_style() {
  let map = CounterStyleMap::from_rules([
    binary("angle")
      .with_prefix("<")
      .with_suffix(">")
      .with_speak_as(SpeakAs::Reference("lower-alpha".into())),
    binary("as-disc").with_speak_as(SpeakAs::Reference("disc".into())),
    cyclic("diamond", "\u{25C6}"),
    binary("as-diamond").with_speak_as(SpeakAs::Reference("diamond".into())),
  ]);
  let angle = map.find_counter_style("angle");
  assert_eq!(angle.effective_speak_as(), SpeakAs::Words);
  assert_eq!(angle.generate_text_alternative(3), "<c>");
  assert_eq!(spoken(&map, "as-disc", 3), "\u{2022} ");
  assert_eq!(spoken(&map, "as-diamond", 3), "\u{2022} ");
}

#[test]
fn reference_chains_resolve_hop_by_hop() {
  let map = CounterStyleMap::from_rules([
    binary("outer")
      .with_prefix("(")
      .with_suffix(")")
      .with_speak_as(SpeakAs::Reference("middle".into())),
    cyclic("middle", "m").with_speak_as(SpeakAs::Reference("lower-alpha".into())),
  ]);
  assert_eq!(spoken(&map, "outer", 3), "(c)");
  assert_eq!(spoken(&map, "middle", 3), "c. ");
  assert_eq!(
    map.find_counter_style("outer").style().speak_as(),
    &SpeakAs::Reference("middle".into())
  );
}

#[test]
fn reference_cycle_behaves_as_auto() {
  let map = CounterStyleMap::from_rules([
    binary("ping").with_speak_as(SpeakAs::Reference("pong".into())),
    cyclic("pong", "p").with_speak_as(SpeakAs::Reference("ping".into())),
    cyclic("lead", "l")
      .with_suffix(":")
      .with_speak_as(SpeakAs::Reference("ping".into())),
  ]);
  let ping = map.find_counter_style("ping");
  assert_eq!(ping.style().speak_as(), &SpeakAs::Auto);
  assert!(!ping.style().has_inexistent_references());
  assert_eq!(ping.generate_text_alternative(3), "3. ");
  assert_eq!(spoken(&map, "pong", 3), "\u{2022} ");
  assert_eq!(spoken(&map, "lead", 3), "3:");
}

#[test]
fn dangling_reference_behaves_as_auto_until_defined() {
  let mut map =
    CounterStyleMap::from_rules([binary("hopeful").with_speak_as(SpeakAs::Reference("later".into()))]);
  let hopeful = map.find_counter_style("hopeful");
  assert_eq!(hopeful.style().speak_as(), &SpeakAs::Auto);
  assert!(hopeful.style().has_inexistent_references());
  assert_eq!(hopeful.generate_text_alternative(3), "3. ");

  map
    .add_rule(
      CounterStyleRule::new("later")
        .with_system(CounterSystem::Alphabetic)
        .with_symbols(["x", "y"]),
    )
    .expect("add referenced rule");
  map.update();
  let hopeful = map.find_counter_style("hopeful");
  assert!(!hopeful.style().has_inexistent_references());
  assert_eq!(hopeful.generate_text_alternative(3), "xx. ");
}

#[test]
fn speak_as_is_inherited_through_extends() {
  let map = CounterStyleMap::from_rules([
    binary("worded").with_speak_as(SpeakAs::Words),
    CounterStyleRule::new("heir").extending("worded").with_suffix("!"),
    CounterStyleRule::new("rebel")
      .extending("worded")
      .with_speak_as(SpeakAs::Numbers),
  ]);
  assert_eq!(spoken(&map, "heir", 3), "11!");
  assert_eq!(spoken(&map, "rebel", 3), "3. ");
}

#[test]
fn references_follow_edits_further_down_the_chain() {
  let mut map = CounterStyleMap::from_rules([
    binary("head").with_speak_as(SpeakAs::Reference("middle".into())),
    cyclic("middle", "m").with_speak_as(SpeakAs::Reference("tail".into())),
    binary("tail").with_speak_as(SpeakAs::Words),
  ]);
  assert_eq!(
    map.find_counter_style("head").effective_speak_as(),
    SpeakAs::Words
  );
  assert_eq!(spoken(&map, "head", 3), "11. ");

  map
    .edit_rule("middle", |rule| rule.speak_as = Some(SpeakAs::Bullets))
    .expect("edit middle");
  map.update();
  assert!(!map.is_dirty("head"));
  assert_eq!(
    map.find_counter_style("middle").effective_speak_as(),
    SpeakAs::Bullets
  );
  assert_eq!(
    map.find_counter_style("head").effective_speak_as(),
    SpeakAs::Bullets
  );
  assert_eq!(spoken(&map, "head", 3), "\u{2022} ");
}

#[test]
fn removing_the_referenced_style_makes_the_reference_dangle() {
  let mut map = CounterStyleMap::from_rules([
    cyclic("speaker", "s").with_speak_as(SpeakAs::Reference("voice".into())),
    binary("voice"),
  ]);
  assert_eq!(
    map.find_counter_style("speaker").effective_speak_as(),
    SpeakAs::Numbers
  );
  assert_eq!(spoken(&map, "speaker", 3), "3. ");

  map.remove_rule("voice");
  map.update();
  let speaker = map.find_counter_style("speaker");
  assert_eq!(speaker.style().speak_as(), &SpeakAs::Auto);
  assert!(speaker.style().has_inexistent_references());
  assert_eq!(speaker.effective_speak_as(), SpeakAs::Bullets);
  assert_eq!(speaker.generate_text_alternative(3), "\u{2022} ");

  map.add_rule(binary("voice")).expect("add voice");
  map.update();
  let speaker = map.find_counter_style("speaker");
  assert!(!speaker.style().has_inexistent_references());
  assert_eq!(speaker.effective_speak_as(), SpeakAs::Numbers);
}

#[test]
fn edit_closing_a_reference_cycle_falls_back_to_auto() {
  let mut map = CounterStyleMap::from_rules([
    cyclic("left", "l").with_speak_as(SpeakAs::Reference("right".into())),
    binary("right").with_speak_as(SpeakAs::Words),
  ]);
  assert_eq!(spoken(&map, "left", 3), "11. ");

  map
    .edit_rule("right", |rule| {
      rule.speak_as = Some(SpeakAs::Reference("left".into()))
    })
    .expect("edit right");
  map.update();
  assert_eq!(map.find_counter_style("left").style().speak_as(), &SpeakAs::Auto);
  assert_eq!(map.find_counter_style("right").style().speak_as(), &SpeakAs::Auto);
  assert_eq!(spoken(&map, "left", 3), "\u{2022} ");
  assert_eq!(spoken(&map, "right", 3), "3. ");
}

#[test]
fn author_rule_shadows_referenced_user_agent_style() {
  let mut map = CounterStyleMap::from_rules([
    binary("lettered").with_speak_as(SpeakAs::Reference("lower-alpha".into())),
  ]);
  assert_eq!(spoken(&map, "lettered", 3), "c. ");

  map.add_rule(cyclic("lower-alpha", "*")).expect("add shadowing rule");
  map.update();
  assert_eq!(
    map.find_counter_style("lettered").effective_speak_as(),
    SpeakAs::Bullets
  );
  assert_eq!(spoken(&map, "lettered", 3), "\u{2022} ");
}
