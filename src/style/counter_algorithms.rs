//! Numbering-system algorithms.
//!
//! Symbol-table systems return the zero-based indexes of the symbols to
//! concatenate; algorithmic scripts return the finished string. `None` means
//! the value cannot be represented and the caller must use the fallback style.
//!
//! Algorithms operate on the magnitude of the counter value except `cyclic`
//! and `fixed`, which take the signed value. Every algorithm whose output
//! length grows linearly with the value is bounded by `limit`.
//!
//! See <https://drafts.csswg.org/css-counter-styles/#counter-style-system>.

use crate::style::counter_styles::{ArmenianCase, CjkVariant};

/// `cyclic`: symbols repeat endlessly, value 1 maps to the first symbol.
pub fn cyclic(value: i32, num_symbols: usize) -> Option<Vec<usize>> {
  if num_symbols == 0 {
    return None;
  }
  let index = (i64::from(value) - 1).rem_euclid(num_symbols as i64);
  Some(vec![index as usize])
}

/// `fixed`: each symbol is used exactly once, starting at `first_symbol_value`.
pub fn fixed(value: i32, first_symbol_value: i32, num_symbols: usize) -> Option<Vec<usize>> {
  let offset = i64::from(value) - i64::from(first_symbol_value);
  if offset < 0 || offset >= num_symbols as i64 {
    return None;
  }
  Some(vec![offset as usize])
}

/// `symbolic`: cycles through the symbols, doubling them up on each pass.
pub fn symbolic(value: u32, num_symbols: usize, limit: usize) -> Option<Vec<usize>> {
  if value == 0 || num_symbols == 0 {
    return None;
  }
  let value = value as usize;
  let index = (value - 1) % num_symbols;
  let repetitions = value.div_ceil(num_symbols);
  if repetitions > limit {
    return None;
  }
  Some(vec![index; repetitions])
}

/// `alphabetic`: bijective base-n numeral.
pub fn alphabetic(value: u32, num_symbols: usize) -> Option<Vec<usize>> {
  if value == 0 || num_symbols < 2 {
    return None;
  }
  let base = num_symbols as u64;
  let mut value = u64::from(value);
  let mut digits = Vec::new();
  while value > 0 {
    value -= 1;
    digits.push((value % base) as usize);
    value /= base;
  }
  digits.reverse();
  Some(digits)
}

/// `numeric`: positional base-n numeral, zero maps to the first symbol.
pub fn numeric(value: u32, num_symbols: usize) -> Option<Vec<usize>> {
  if num_symbols < 2 {
    return None;
  }
  if value == 0 {
    return Some(vec![0]);
  }
  let base = num_symbols as u64;
  let mut value = u64::from(value);
  let mut digits = Vec::new();
  while value > 0 {
    digits.push((value % base) as usize);
    value /= base;
  }
  digits.reverse();
  Some(digits)
}

/// `additive`: greedy sign-value decomposition.
///
/// `weights` are strictly decreasing; a trailing weight of 0 supplies the
/// representation of zero.
pub fn additive(value: u32, weights: &[u32], limit: usize) -> Option<Vec<usize>> {
  let last = *weights.last()?;
  if value == 0 {
    return (last == 0).then(|| vec![weights.len() - 1]);
  }

  let mut value = value;
  let mut indexes = Vec::new();
  for (index, &weight) in weights.iter().enumerate() {
    if value == 0 || weight == 0 {
      break;
    }
    let repetitions = (value / weight) as usize;
    if repetitions > 0 {
      if indexes.len() + repetitions > limit {
        return None;
      }
      indexes.extend(std::iter::repeat(index).take(repetitions));
    }
    value %= weight;
  }
  (value == 0).then_some(indexes)
}

// ============================================================================
// CJK ideographic
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CjkLang {
  Chinese,
  Korean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CjkStyle {
  Formal,
  Informal,
}

/// Glyph table in the order of css-counter-styles: group markers (two slots
/// each), digit markers for 10/100/1000, then the digits 0-9. `'\0'` is an
/// empty slot; slot 0 is never emitted.
struct CjkTable {
  lang: CjkLang,
  style: CjkStyle,
  glyphs: [char; 20],
}

// Abstract glyphs placed in the layout buffer; each indexes `CjkTable::glyphs`.
const NO_CHAR: u8 = 0;
const SECOND_GROUP_MARKER: u8 = 1;
const THIRD_GROUP_MARKER: u8 = 3;
const FOURTH_GROUP_MARKER: u8 = 5;
const SECOND_DIGIT_MARKER: u8 = 7;
const THIRD_DIGIT_MARKER: u8 = 8;
const FOURTH_DIGIT_MARKER: u8 = 9;
const DIGIT0: u8 = 10;

// 4 digits, 3 digit markers and a two-slot group marker.
const GROUP_LENGTH: usize = 9;
const BUFFER_LENGTH: usize = 4 * GROUP_LENGTH;

const SIMP_CHINESE_INFORMAL: CjkTable = CjkTable {
  lang: CjkLang::Chinese,
  style: CjkStyle::Informal,
  glyphs: [
    '\0', '\u{4E07}', '\0', '\u{4EBF}', '\0', '\u{4E07}', '\u{4EBF}', '\u{5341}', '\u{767E}',
    '\u{5343}', '\u{96F6}', '\u{4E00}', '\u{4E8C}', '\u{4E09}', '\u{56DB}', '\u{4E94}', '\u{516D}',
    '\u{4E03}', '\u{516B}', '\u{4E5D}',
  ],
};

const SIMP_CHINESE_FORMAL: CjkTable = CjkTable {
  lang: CjkLang::Chinese,
  style: CjkStyle::Formal,
  glyphs: [
    '\0', '\u{4E07}', '\0', '\u{4EBF}', '\0', '\u{4E07}', '\u{4EBF}', '\u{62FE}', '\u{4F70}',
    '\u{4EDF}', '\u{96F6}', '\u{58F9}', '\u{8D30}', '\u{53C1}', '\u{8086}', '\u{4F0D}', '\u{9646}',
    '\u{67D2}', '\u{634C}', '\u{7396}',
  ],
};

const TRAD_CHINESE_INFORMAL: CjkTable = CjkTable {
  lang: CjkLang::Chinese,
  style: CjkStyle::Informal,
  glyphs: [
    '\0', '\u{842C}', '\0', '\u{5104}', '\0', '\u{5146}', '\0', '\u{5341}', '\u{767E}',
    '\u{5343}', '\u{96F6}', '\u{4E00}', '\u{4E8C}', '\u{4E09}', '\u{56DB}', '\u{4E94}', '\u{516D}',
    '\u{4E03}', '\u{516B}', '\u{4E5D}',
  ],
};

const TRAD_CHINESE_FORMAL: CjkTable = CjkTable {
  lang: CjkLang::Chinese,
  style: CjkStyle::Formal,
  glyphs: [
    '\0', '\u{842C}', '\0', '\u{5104}', '\0', '\u{5146}', '\0', '\u{62FE}', '\u{4F70}',
    '\u{4EDF}', '\u{96F6}', '\u{58F9}', '\u{8CB3}', '\u{53C3}', '\u{8086}', '\u{4F0D}', '\u{9678}',
    '\u{67D2}', '\u{634C}', '\u{7396}',
  ],
};

const KOREAN_HANGUL_FORMAL: CjkTable = CjkTable {
  lang: CjkLang::Korean,
  style: CjkStyle::Formal,
  glyphs: [
    '\0', '\u{B9CC}', '\0', '\u{C5B5}', '\0', '\u{C870}', '\0', '\u{C2ED}', '\u{BC31}',
    '\u{CC9C}', '\u{C601}', '\u{C77C}', '\u{C774}', '\u{C0BC}', '\u{C0AC}', '\u{C624}', '\u{C721}',
    '\u{CE60}', '\u{D314}', '\u{AD6C}',
  ],
};

const KOREAN_HANJA_INFORMAL: CjkTable = CjkTable {
  lang: CjkLang::Korean,
  style: CjkStyle::Informal,
  glyphs: [
    '\0', '\u{842C}', '\0', '\u{5104}', '\0', '\u{5146}', '\0', '\u{5341}', '\u{767E}',
    '\u{5343}', '\u{96F6}', '\u{4E00}', '\u{4E8C}', '\u{4E09}', '\u{56DB}', '\u{4E94}', '\u{516D}',
    '\u{4E03}', '\u{516B}', '\u{4E5D}',
  ],
};

const KOREAN_HANJA_FORMAL: CjkTable = CjkTable {
  lang: CjkLang::Korean,
  style: CjkStyle::Formal,
  glyphs: [
    '\0', '\u{842C}', '\0', '\u{5104}', '\0', '\u{5146}', '\0', '\u{62FE}', '\u{767E}',
    '\u{4EDF}', '\u{96F6}', '\u{58F9}', '\u{8CB3}', '\u{53C3}', '\u{56DB}', '\u{4E94}', '\u{516D}',
    '\u{4E03}', '\u{516B}', '\u{4E5D}',
  ],
};

fn cjk_table(variant: CjkVariant) -> &'static CjkTable {
  match variant {
    CjkVariant::SimpChineseInformal => &SIMP_CHINESE_INFORMAL,
    CjkVariant::SimpChineseFormal => &SIMP_CHINESE_FORMAL,
    CjkVariant::TradChineseInformal => &TRAD_CHINESE_INFORMAL,
    CjkVariant::TradChineseFormal => &TRAD_CHINESE_FORMAL,
    CjkVariant::KoreanHangulFormal => &KOREAN_HANGUL_FORMAL,
    CjkVariant::KoreanHanjaInformal => &KOREAN_HANJA_INFORMAL,
    CjkVariant::KoreanHanjaFormal => &KOREAN_HANJA_FORMAL,
  }
}

/// CJK ideographic numbering for every variant.
pub fn cjk_ideographic(value: u32, variant: CjkVariant) -> String {
  let table = cjk_table(variant);
  if value == 0 {
    return table.glyphs[DIGIT0 as usize].to_string();
  }

  let chinese = table.lang == CjkLang::Chinese;
  let korean_informal = table.lang == CjkLang::Korean && table.style == CjkStyle::Informal;
  let chinese_informal = chinese && table.style == CjkStyle::Informal;

  let mut buffer = [NO_CHAR; BUFFER_LENGTH];
  let mut number = value;
  for i in 0..4u8 {
    let group_value = number % 10000;
    number /= 10000;

    // The least-significant group goes last in the buffer.
    let start = (3 - i as usize) * GROUP_LENGTH;
    let group = &mut buffer[start..start + GROUP_LENGTH];

    if group_value != 0 && i != 0 {
      group[8] = SECOND_GROUP_MARKER + i;
      group[7] = SECOND_GROUP_MARKER - 1 + i;
    }

    let digit = |d: u32| DIGIT0 + d as u8;

    let mut digit_value = group_value % 10;
    let mut trailing_zero = chinese && digit_value == 0;
    if digit_value != 0 {
      let drop_one = korean_informal && digit_value == 1 && i > 0;
      if !drop_one {
        group[6] = digit(digit_value);
      }
    }

    if number != 0 || group_value > 9 {
      digit_value = (group_value / 10) % 10;
      let drop_one = korean_informal && digit_value == 1;
      if (digit_value != 0 && !drop_one) || (digit_value == 0 && !trailing_zero) {
        group[4] = digit(digit_value);
      }
      trailing_zero &= digit_value == 0;
      if digit_value != 0 {
        group[5] = SECOND_DIGIT_MARKER;
      }
    }

    if number != 0 || group_value > 99 {
      digit_value = (group_value / 100) % 10;
      let drop_one = korean_informal && digit_value == 1;
      if (digit_value != 0 && !drop_one) || (digit_value == 0 && !trailing_zero) {
        group[2] = digit(digit_value);
      }
      trailing_zero &= digit_value == 0;
      if digit_value != 0 {
        group[3] = THIRD_DIGIT_MARKER;
      }
    }

    if number != 0 || group_value > 999 {
      digit_value = group_value / 1000;
      let drop_one = korean_informal && digit_value == 1;
      if (digit_value != 0 && !drop_one) || (digit_value == 0 && !trailing_zero) {
        group[0] = digit(digit_value);
      }
      if digit_value != 0 {
        group[1] = FOURTH_DIGIT_MARKER;
      }
    }

    if trailing_zero && i > 0 {
      group[6] = group[7];
      group[7] = group[8];
      group[8] = DIGIT0;
    }

    // Informal Chinese drops the tens digit (but keeps the marker) below 20.
    if chinese_informal && group_value < 20 {
      group[4] = NO_CHAR;
    }

    if number == 0 {
      break;
    }
  }

  // Runs of zero digits collapse into one, and a trailing zero is dropped.
  let mut chars: Vec<char> = Vec::with_capacity(BUFFER_LENGTH * 2);
  let mut last = NO_CHAR;
  for &glyph in buffer.iter().filter(|&&glyph| glyph != NO_CHAR) {
    if glyph != DIGIT0 || (chinese && last != DIGIT0) {
      let ch = table.glyphs[glyph as usize];
      if ch != '\0' {
        chars.push(ch);
        if table.lang == CjkLang::Korean
          && matches!(
            glyph,
            SECOND_GROUP_MARKER | THIRD_GROUP_MARKER | FOURTH_GROUP_MARKER
          )
        {
          chars.push(' ');
        }
      }
    }
    last = glyph;
  }
  if (chinese && last == DIGIT0) || chars.last() == Some(&' ') {
    chars.pop();
  }
  chars.into_iter().collect()
}

// ============================================================================
// Hebrew
// ============================================================================

const HEBREW_GERESH: char = '\u{05F3}';
const HEBREW_ZERO: &str = "\u{05D0}\u{05E4}\u{05E1}";
const HEBREW_TENS: [char; 9] = [
  '\u{05D9}', '\u{05DB}', '\u{05DC}', '\u{05DE}', '\u{05E0}', '\u{05E1}', '\u{05E2}', '\u{05E4}',
  '\u{05E6}',
];

fn hebrew_letter(code: u32) -> char {
  char::from_u32(code).unwrap_or('\u{FFFD}')
}

fn hebrew_under_1000(mut number: u32, out: &mut String) {
  debug_assert!(number < 1000);
  // Tav (400) repeats for every full 400.
  for _ in 0..number / 400 {
    out.push('\u{05EA}');
  }
  number %= 400;
  if number >= 100 {
    out.push(hebrew_letter(0x05E7 + number / 100 - 1));
  }
  number %= 100;
  // 15 and 16 are written 9+6 and 9+7 to avoid spelling divine names.
  if number == 15 || number == 16 {
    out.push('\u{05D8}');
    out.push(hebrew_letter(0x05CF + number - 9));
    return;
  }
  let tens = number / 10;
  if tens > 0 {
    out.push(HEBREW_TENS[tens as usize - 1]);
  }
  let ones = number % 10;
  if ones > 0 {
    out.push(hebrew_letter(0x05CF + ones));
  }
}

/// Hebrew additive letters, 0 to 999999.
pub fn hebrew(value: u32) -> Option<String> {
  if value > 999_999 {
    return None;
  }
  if value == 0 {
    return Some(HEBREW_ZERO.to_string());
  }
  let mut out = String::new();
  if value <= 999 {
    hebrew_under_1000(value, &mut out);
    return Some(out);
  }
  hebrew_under_1000(value / 1000, &mut out);
  out.push(HEBREW_GERESH);
  hebrew_under_1000(value % 1000, &mut out);
  Some(out)
}

// ============================================================================
// Armenian
// ============================================================================

const ARMENIAN_MYRIAD_MARK: char = '\u{0302}';

fn armenian_under_10000(number: u32, case: ArmenianCase, myriad: bool, out: &mut String) {
  debug_assert!(number < 10000);
  let lower_offset = match case {
    ArmenianCase::Upper => 0,
    ArmenianCase::Lower => 0x30,
  };
  let mut push = |code: u32| {
    out.push(char::from_u32(code + lower_offset).unwrap_or('\u{FFFD}'));
    if myriad {
      out.push(ARMENIAN_MYRIAD_MARK);
    }
  };

  let thousands = number / 1000;
  if thousands == 7 {
    // The 7000 letter sits outside the contiguous thousands block.
    push(0x0552);
  } else if thousands > 0 {
    push(0x054C - 1 + thousands);
  }
  let hundreds = (number / 100) % 10;
  if hundreds > 0 {
    push(0x0543 - 1 + hundreds);
  }
  let tens = (number / 10) % 10;
  if tens > 0 {
    push(0x053A - 1 + tens);
  }
  let ones = number % 10;
  if ones > 0 {
    push(0x0531 - 1 + ones);
  }
}

/// Armenian letters, 1 to 99999999.
///
/// The upper four digits reuse the letters of the lower four with a combining
/// circumflex marking multiplication by 10000.
pub fn armenian(value: u32, case: ArmenianCase) -> Option<String> {
  if value == 0 || value > 99_999_999 {
    return None;
  }
  let mut out = String::new();
  armenian_under_10000(value / 10000, case, true, &mut out);
  armenian_under_10000(value % 10000, case, false, &mut out);
  Some(out)
}

// ============================================================================
// Ethiopic numeric
// ============================================================================

const ETHIOPIC_UNITS: [char; 9] = [
  '\u{1369}', '\u{136A}', '\u{136B}', '\u{136C}', '\u{136D}', '\u{136E}', '\u{136F}', '\u{1370}',
  '\u{1371}',
];
const ETHIOPIC_TENS: [char; 9] = [
  '\u{1372}', '\u{1373}', '\u{1374}', '\u{1375}', '\u{1376}', '\u{1377}', '\u{1378}', '\u{1379}',
  '\u{137A}',
];
const ETHIOPIC_HUNDRED: char = '\u{137B}';
const ETHIOPIC_TEN_THOUSAND: char = '\u{137C}';

/// Ethiopic numerals.
///
/// See <https://drafts.csswg.org/css-counter-styles-3/#ethiopic-numeric-counter-style>.
pub fn ethiopic_numeric(value: u32) -> Option<String> {
  if value == 0 {
    return None;
  }
  if value < 10 {
    return Some(ETHIOPIC_UNITS[value as usize - 1].to_string());
  }

  // Built least-significant first, then reversed.
  let mut reversed: Vec<char> = Vec::new();
  let mut value = value;
  let mut odd_group = false;
  while value > 0 {
    let group_value = value % 100;
    value /= 100;
    if !odd_group {
      // Group 0 gets a marker as well; it is dropped after reversing.
      reversed.push(ETHIOPIC_TEN_THOUSAND);
    } else if group_value != 0 {
      reversed.push(ETHIOPIC_HUNDRED);
    }
    let most_significant_group = value == 0;
    let remove_digits =
      group_value == 0 || (group_value == 1 && (most_significant_group || odd_group));
    if !remove_digits {
      let unit = group_value % 10;
      if unit != 0 {
        reversed.push(ETHIOPIC_UNITS[unit as usize - 1]);
      }
      let ten = group_value / 10;
      if ten != 0 {
        reversed.push(ETHIOPIC_TENS[ten as usize - 1]);
      }
    }
    odd_group = !odd_group;
  }

  reversed.reverse();
  reversed.pop();
  Some(reversed.into_iter().collect())
}
