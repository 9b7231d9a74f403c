//! User-agent `@counter-style` rules.
//!
//! The predefined styles of CSS Counter Styles Level 3, expressed as the same
//! [`CounterStyleRule`] values author sheets produce. The script systems that
//! cannot be written as symbol tables use the internal algorithmic systems.
//!
//! See <https://drafts.csswg.org/css-counter-styles/#predefined-counters>.

use crate::style::counter_styles::{
  ArmenianCase, CjkVariant, CounterStyleRule, CounterSystem,
};

pub const DECIMAL: &str = "decimal";
pub const DISC: &str = "disc";

/// Bullet styles that speak as themselves.
pub const SYMBOL_MARKERS: &[&str] = &[
  "disc",
  "circle",
  "square",
  "disclosure-open",
  "disclosure-closed",
];

/// Every name defined by the user-agent sheet.
pub const NAMES: &[&str] = &[
  "decimal",
  "decimal-leading-zero",
  "arabic-indic",
  "armenian",
  "upper-armenian",
  "lower-armenian",
  "bengali",
  "cambodian",
  "khmer",
  "cjk-decimal",
  "devanagari",
  "georgian",
  "gujarati",
  "gurmukhi",
  "hebrew",
  "kannada",
  "lao",
  "malayalam",
  "mongolian",
  "myanmar",
  "oriya",
  "persian",
  "lower-roman",
  "upper-roman",
  "tamil",
  "telugu",
  "thai",
  "tibetan",
  "lower-alpha",
  "lower-latin",
  "upper-alpha",
  "upper-latin",
  "lower-greek",
  "hiragana",
  "hiragana-iroha",
  "katakana",
  "katakana-iroha",
  "disc",
  "circle",
  "square",
  "disclosure-open",
  "disclosure-closed",
  "cjk-earthly-branch",
  "cjk-heavenly-stem",
  "japanese-informal",
  "japanese-formal",
  "korean-hangul-formal",
  "korean-hanja-informal",
  "korean-hanja-formal",
  "simp-chinese-informal",
  "simp-chinese-formal",
  "trad-chinese-informal",
  "trad-chinese-formal",
  "cjk-ideographic",
  "ethiopic-numeric",
];

/// The lowercase user-agent name matching `name` ASCII case-insensitively.
pub fn canonical_name(name: &str) -> Option<&'static str> {
  NAMES
    .iter()
    .copied()
    .find(|candidate| candidate.eq_ignore_ascii_case(name))
}

fn symbols(name: &str, system: CounterSystem, list: &str) -> CounterStyleRule {
  CounterStyleRule::new(name)
    .with_system(system)
    .with_symbols(list.split_whitespace())
}

/// Ten consecutive code points starting at `zero`.
fn decimal_digits(name: &str, zero: char) -> CounterStyleRule {
  let digits = (0..10u32).filter_map(|offset| char::from_u32(zero as u32 + offset));
  CounterStyleRule::new(name)
    .with_system(CounterSystem::Numeric)
    .with_symbols(digits.map(String::from))
}

fn additive(name: &str, table: &[(u32, &str)]) -> CounterStyleRule {
  CounterStyleRule::new(name)
    .with_system(CounterSystem::Additive)
    .with_additive_symbols(table.iter().copied())
}

fn bullet(name: &str, symbol: &str) -> CounterStyleRule {
  CounterStyleRule::new(name)
    .with_system(CounterSystem::Cyclic)
    .with_symbols([symbol])
    .with_suffix(" ")
}

fn cjk(name: &str, variant: CjkVariant, negative: &str, suffix: &str) -> CounterStyleRule {
  CounterStyleRule::new(name)
    .with_system(CounterSystem::Cjk(variant))
    .with_suffix(suffix)
    .with_negative(negative, "")
    .with_range([(-9999, 9999)])
    .with_fallback("cjk-decimal")
}

const ROMAN: &[(u32, &str)] = &[
  (1000, "M"),
  (900, "CM"),
  (500, "D"),
  (400, "CD"),
  (100, "C"),
  (90, "XC"),
  (50, "L"),
  (40, "XL"),
  (10, "X"),
  (9, "IX"),
  (5, "V"),
  (4, "IV"),
  (1, "I"),
];

const GEORGIAN: &[(u32, &str)] = &[
  (10000, "ჵ"),
  (9000, "ჰ"),
  (8000, "ჯ"),
  (7000, "ჴ"),
  (6000, "ხ"),
  (5000, "ჭ"),
  (4000, "წ"),
  (3000, "ძ"),
  (2000, "ც"),
  (1000, "ჩ"),
  (900, "შ"),
  (800, "ყ"),
  (700, "ღ"),
  (600, "ქ"),
  (500, "ფ"),
  (400, "ჳ"),
  (300, "ტ"),
  (200, "ს"),
  (100, "რ"),
  (90, "ჟ"),
  (80, "პ"),
  (70, "ო"),
  (60, "ჲ"),
  (50, "ნ"),
  (40, "მ"),
  (30, "ლ"),
  (20, "კ"),
  (10, "ი"),
  (9, "თ"),
  (8, "ჱ"),
  (7, "ზ"),
  (6, "ვ"),
  (5, "ე"),
  (4, "დ"),
  (3, "გ"),
  (2, "ბ"),
  (1, "ა"),
];

const JAPANESE_INFORMAL: &[(u32, &str)] = &[
  (9000, "九千"),
  (8000, "八千"),
  (7000, "七千"),
  (6000, "六千"),
  (5000, "五千"),
  (4000, "四千"),
  (3000, "三千"),
  (2000, "二千"),
  (1000, "千"),
  (900, "九百"),
  (800, "八百"),
  (700, "七百"),
  (600, "六百"),
  (500, "五百"),
  (400, "四百"),
  (300, "三百"),
  (200, "二百"),
  (100, "百"),
  (90, "九十"),
  (80, "八十"),
  (70, "七十"),
  (60, "六十"),
  (50, "五十"),
  (40, "四十"),
  (30, "三十"),
  (20, "二十"),
  (10, "十"),
  (9, "九"),
  (8, "八"),
  (7, "七"),
  (6, "六"),
  (5, "五"),
  (4, "四"),
  (3, "三"),
  (2, "二"),
  (1, "一"),
  (0, "〇"),
];

const JAPANESE_FORMAL: &[(u32, &str)] = &[
  (9000, "九阡"),
  (8000, "八阡"),
  (7000, "七阡"),
  (6000, "六阡"),
  (5000, "伍阡"),
  (4000, "四阡"),
  (3000, "参阡"),
  (2000, "弐阡"),
  (1000, "壱阡"),
  (900, "九百"),
  (800, "八百"),
  (700, "七百"),
  (600, "六百"),
  (500, "伍百"),
  (400, "四百"),
  (300, "参百"),
  (200, "弐百"),
  (100, "壱百"),
  (90, "九拾"),
  (80, "八拾"),
  (70, "七拾"),
  (60, "六拾"),
  (50, "伍拾"),
  (40, "四拾"),
  (30, "参拾"),
  (20, "弐拾"),
  (10, "壱拾"),
  (9, "九"),
  (8, "八"),
  (7, "七"),
  (6, "六"),
  (5, "伍"),
  (4, "四"),
  (3, "参"),
  (2, "弐"),
  (1, "壱"),
  (0, "零"),
];

fn japanese(name: &str, table: &[(u32, &str)]) -> CounterStyleRule {
  additive(name, table)
    .with_suffix("、")
    .with_negative("マイナス", "")
    .with_range([(-9999, 9999)])
    .with_fallback("cjk-decimal")
}

fn lowercase(table: &[(u32, &str)]) -> Vec<(u32, String)> {
  table
    .iter()
    .map(|(weight, symbol)| (*weight, symbol.to_ascii_lowercase()))
    .collect()
}

/// The `decimal` rule every fallback chain ends in.
pub fn decimal_rule() -> CounterStyleRule {
  decimal_digits(DECIMAL, '0')
}

/// All user-agent rules, in sheet order.
pub fn rules() -> Vec<CounterStyleRule> {
  const KOREAN_NEGATIVE: &str = "마이너스 ";
  vec![
    decimal_rule(),
    CounterStyleRule::new("decimal-leading-zero")
      .extending("decimal")
      .with_pad(2, "0"),
    decimal_digits("arabic-indic", '\u{0660}'),
    CounterStyleRule::new("armenian").with_system(CounterSystem::Armenian(ArmenianCase::Upper)),
    CounterStyleRule::new("upper-armenian")
      .with_system(CounterSystem::Armenian(ArmenianCase::Upper)),
    CounterStyleRule::new("lower-armenian")
      .with_system(CounterSystem::Armenian(ArmenianCase::Lower)),
    decimal_digits("bengali", '\u{09E6}'),
    decimal_digits("cambodian", '\u{17E0}'),
    CounterStyleRule::new("khmer").extending("cambodian"),
    symbols("cjk-decimal", CounterSystem::Numeric, "〇 一 二 三 四 五 六 七 八 九")
      .with_suffix("、"),
    decimal_digits("devanagari", '\u{0966}'),
    additive("georgian", GEORGIAN).with_range([(1, 19999)]),
    decimal_digits("gujarati", '\u{0AE6}'),
    decimal_digits("gurmukhi", '\u{0A66}'),
    CounterStyleRule::new("hebrew").with_system(CounterSystem::Hebrew),
    decimal_digits("kannada", '\u{0CE6}'),
    decimal_digits("lao", '\u{0ED0}'),
    decimal_digits("malayalam", '\u{0D66}'),
    decimal_digits("mongolian", '\u{1810}'),
    decimal_digits("myanmar", '\u{1040}'),
    decimal_digits("oriya", '\u{0B66}'),
    decimal_digits("persian", '\u{06F0}'),
    CounterStyleRule::new("lower-roman")
      .with_system(CounterSystem::Additive)
      .with_additive_symbols(lowercase(ROMAN))
      .with_range([(1, 3999)]),
    additive("upper-roman", ROMAN).with_range([(1, 3999)]),
    decimal_digits("tamil", '\u{0BE6}'),
    decimal_digits("telugu", '\u{0C66}'),
    decimal_digits("thai", '\u{0E50}'),
    decimal_digits("tibetan", '\u{0F20}'),
    symbols(
      "lower-alpha",
      CounterSystem::Alphabetic,
      "a b c d e f g h i j k l m n o p q r s t u v w x y z",
    ),
    symbols(
      "lower-latin",
      CounterSystem::Alphabetic,
      "a b c d e f g h i j k l m n o p q r s t u v w x y z",
    ),
    symbols(
      "upper-alpha",
      CounterSystem::Alphabetic,
      "A B C D E F G H I J K L M N O P Q R S T U V W X Y Z",
    ),
    symbols(
      "upper-latin",
      CounterSystem::Alphabetic,
      "A B C D E F G H I J K L M N O P Q R S T U V W X Y Z",
    ),
    symbols(
      "lower-greek",
      CounterSystem::Alphabetic,
      "α β γ δ ε ζ η θ ι κ λ μ ν ξ ο π ρ σ τ υ φ χ ψ ω",
    ),
    symbols(
      "hiragana",
      CounterSystem::Alphabetic,
      "あ い う え お か き く け こ さ し す せ そ た ち つ て と な に ぬ ね の は ひ ふ へ ほ \
       ま み む め も や ゆ よ ら り る れ ろ わ ゐ ゑ を ん",
    )
    .with_suffix("、"),
    symbols(
      "hiragana-iroha",
      CounterSystem::Alphabetic,
      "い ろ は に ほ へ と ち り ぬ る を わ か よ た れ そ つ ね な ら む う ゐ の お く や ま \
       け ふ こ え て あ さ き ゆ め み し ゑ ひ も せ す",
    )
    .with_suffix("、"),
    symbols(
      "katakana",
      CounterSystem::Alphabetic,
      "ア イ ウ エ オ カ キ ク ケ コ サ シ ス セ ソ タ チ ツ テ ト ナ ニ ヌ ネ ノ ハ ヒ フ ヘ ホ \
       マ ミ ム メ モ ヤ ユ ヨ ラ リ ル レ ロ ワ ヰ ヱ ヲ ン",
    )
    .with_suffix("、"),
    symbols(
      "katakana-iroha",
      CounterSystem::Alphabetic,
      "イ ロ ハ ニ ホ ヘ ト チ リ ヌ ル ヲ ワ カ ヨ タ レ ソ ツ ネ ナ ラ ム ウ ヰ ノ オ ク ヤ マ \
       ケ フ コ エ テ ア サ キ ユ メ ミ シ ヱ ヒ モ セ ス",
    )
    .with_suffix("、"),
    bullet("disc", "\u{2022}"),
    bullet("circle", "\u{25E6}"),
    bullet("square", "\u{25AA}"),
    bullet("disclosure-open", "\u{25BE}"),
    bullet("disclosure-closed", "\u{25B8}"),
    symbols(
      "cjk-earthly-branch",
      CounterSystem::FIXED,
      "子 丑 寅 卯 辰 巳 午 未 申 酉 戌 亥",
    )
    .with_suffix("、")
    .with_fallback("cjk-decimal"),
    symbols(
      "cjk-heavenly-stem",
      CounterSystem::FIXED,
      "甲 乙 丙 丁 戊 己 庚 辛 壬 癸",
    )
    .with_suffix("、")
    .with_fallback("cjk-decimal"),
    japanese("japanese-informal", JAPANESE_INFORMAL),
    japanese("japanese-formal", JAPANESE_FORMAL),
    cjk(
      "korean-hangul-formal",
      CjkVariant::KoreanHangulFormal,
      KOREAN_NEGATIVE,
      ", ",
    ),
    cjk(
      "korean-hanja-informal",
      CjkVariant::KoreanHanjaInformal,
      KOREAN_NEGATIVE,
      ", ",
    ),
    cjk(
      "korean-hanja-formal",
      CjkVariant::KoreanHanjaFormal,
      KOREAN_NEGATIVE,
      ", ",
    ),
    cjk(
      "simp-chinese-informal",
      CjkVariant::SimpChineseInformal,
      "负",
      "、",
    ),
    cjk("simp-chinese-formal", CjkVariant::SimpChineseFormal, "负", "、"),
    cjk(
      "trad-chinese-informal",
      CjkVariant::TradChineseInformal,
      "負",
      "、",
    ),
    cjk("trad-chinese-formal", CjkVariant::TradChineseFormal, "負", "、"),
    CounterStyleRule::new("cjk-ideographic").extending("trad-chinese-informal"),
    CounterStyleRule::new("ethiopic-numeric")
      .with_system(CounterSystem::EthiopicNumeric)
      .with_suffix("/ "),
  ]
}
