//! 数字提取
//!
//! 从清洗后的文本中按出现顺序提取数字。单位词是数字结束的最强信号；
//! 数字后面既没有单位、又出现了不认识的词时，也视为数字结束。

use phf::{phf_map, phf_set};

/// 个位、十几和整十
static SMALL_NUMBERS: phf::Map<&'static str, u32> = phf_map! {
    "zero" => 0,
    "one" => 1,
    "two" => 2,
    "three" => 3,
    "four" => 4,
    "five" => 5,
    "six" => 6,
    "seven" => 7,
    "eight" => 8,
    "nine" => 9,
    "ten" => 10,
    "eleven" => 11,
    "twelve" => 12,
    "thirteen" => 13,
    "fourteen" => 14,
    "fifteen" => 15,
    "sixteen" => 16,
    "seventeen" => 17,
    "eighteen" => 18,
    "nineteen" => 19,
    "twenty" => 20,
    "thirty" => 30,
    "forty" => 40,
    "fifty" => 50,
    "sixty" => 60,
    "seventy" => 70,
    "eighty" => 80,
    "ninety" => 90,
};

static SCALE_WORDS: phf::Map<&'static str, u32> = phf_map! {
    "hundred" => 100,
    "thousand" => 1000,
};

/// 度量单位名词
static UNIT_WORDS: phf::Set<&'static str> = phf_set! {
    // 力
    "newton", "newtons", "kilonewton", "kilonewtons",
    // 质量
    "gram", "grams", "kilogram", "kilograms", "pound", "pounds", "ounce", "ounces",
    // 长度
    "meter", "meters", "metre", "metres", "kilometer", "kilometers", "centimeter",
    "centimeters", "millimeter", "millimeters", "mile", "miles", "foot", "feet",
    "inch", "inches", "yard", "yards",
    // 时间
    "second", "seconds", "minute", "minutes", "hour", "hours",
    // 能量 / 功率
    "joule", "joules", "kilojoule", "kilojoules", "calorie", "calories",
    "watt", "watts", "kilowatt", "kilowatts",
    // 其他
    "volt", "volts", "amp", "amps", "ampere", "amperes", "ohm", "ohms",
    "pascal", "pascals", "hertz", "liter", "liters", "litre", "litres",
    "kelvin", "degree", "degrees", "knot", "knots",
};

/// 不影响累加状态的填充词
static FILLER_WORDS: phf::Set<&'static str> = phf_set! {
    "a", "an", "the", "and", "of",
    "um", "uh", "umm", "er", "erm",
    "lobster", "lobsters", "crustacean", "crustaceans", "molty",
};

/// 单词分类（按优先级）
#[derive(Debug, Clone, Copy, PartialEq)]
enum Word {
    Scale(f64),
    Small(f64),
    Numeral(f64),
    Unit,
    Filler,
    Other,
}

fn classify(word: &str) -> Word {
    if let Some(factor) = SCALE_WORDS.get(word) {
        Word::Scale(f64::from(*factor))
    } else if let Some(value) = SMALL_NUMBERS.get(word) {
        Word::Small(f64::from(*value))
    } else if let Some(value) = parse_numeral(word) {
        Word::Numeral(value)
    } else if UNIT_WORDS.contains(word) {
        Word::Unit
    } else if FILLER_WORDS.contains(word) {
        Word::Filler
    } else {
        Word::Other
    }
}

/// 纯数字记号，最多一个小数点
fn parse_numeral(word: &str) -> Option<f64> {
    let digits = word.chars().filter(char::is_ascii_digit).count();
    let dots = word.chars().filter(|c| *c == '.').count();
    if digits == 0 || dots > 1 || digits + dots != word.chars().count() {
        return None;
    }
    word.parse().ok()
}

/// 正在拼装的数字
///
/// `group` 是当前百位以内的一组，`total` 是已经乘过 thousand 的部分。
#[derive(Debug, Default)]
struct Accumulator {
    total: f64,
    group: f64,
    open: bool,
}

impl Accumulator {
    fn add(&mut self, value: f64) {
        self.group += value;
        self.open = true;
    }

    /// 量级词是乘法；还没有数字时按 1 处理（"hundred" = 100）
    fn scale(&mut self, factor: f64) {
        if factor >= 1000.0 {
            let base = self.total + self.group;
            self.total = (if base > 0.0 { base } else { 1.0 }) * factor;
            self.group = 0.0;
        } else {
            self.group = (if self.group > 0.0 { self.group } else { 1.0 }) * factor;
        }
        self.open = true;
    }

    fn take(&mut self) -> Option<f64> {
        if !self.open {
            return None;
        }
        let value = self.total + self.group;
        *self = Self::default();
        Some(value)
    }
}

/// 从清洗后的文本中提取数字序列（顺序有意义）
pub fn extract_numbers(text: &str) -> Vec<f64> {
    let mut numbers = Vec::new();
    let mut current = Accumulator::default();

    for word in text.split_whitespace() {
        match classify(word) {
            Word::Scale(factor) => current.scale(factor),
            Word::Small(value) | Word::Numeral(value) => current.add(value),
            Word::Filler => {}
            // 单位词和不认识的词都会结束当前数字
            Word::Unit | Word::Other => numbers.extend(current.take()),
        }
    }

    numbers.extend(current.take());
    numbers
}
