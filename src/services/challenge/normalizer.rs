//! 挑战文本清洗
//!
//! 顺序固定：先去噪、再小写、再压缩空白，最后修复被拆开的复合词。
//! 修复规则依赖整词边界，必须在非字母字符全部去掉之后执行。

use std::sync::LazyLock;

use regex::Regex;

/// 被故意拆开的复合词 → 原词
const COMPOUND_REPAIRS: &[(&str, &str)] = &[
    ("new tons", "newtons"),
    ("new ton", "newton"),
    ("kilo newtons", "kilonewtons"),
    ("kilo grams", "kilograms"),
    ("kilo gram", "kilogram"),
    ("kilo meters", "kilometers"),
    ("centi meters", "centimeters"),
    ("milli meters", "millimeters"),
    ("me ters", "meters"),
    ("sec onds", "seconds"),
    ("min utes", "minutes"),
    ("jou les", "joules"),
    ("kilo joules", "kilojoules"),
    ("wat ts", "watts"),
    ("kilo watts", "kilowatts"),
    ("lit ers", "liters"),
    ("pas cals", "pascals"),
    ("twen ty", "twenty"),
    ("thir ty", "thirty"),
    ("for ty", "forty"),
    ("fif ty", "fifty"),
    ("six ty", "sixty"),
    ("seven ty", "seventy"),
    ("eigh ty", "eighty"),
    ("nine ty", "ninety"),
    ("thir teen", "thirteen"),
    ("four teen", "fourteen"),
    ("fif teen", "fifteen"),
    ("six teen", "sixteen"),
    ("seven teen", "seventeen"),
    ("eigh teen", "eighteen"),
    ("nine teen", "nineteen"),
    ("hun dred", "hundred"),
    ("thou sand", "thousand"),
];

static COMPOUND_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    COMPOUND_REPAIRS
        .iter()
        .filter_map(|(split, joined)| {
            Regex::new(&format!(r"\b{}\b", regex::escape(split)))
                .ok()
                .map(|re| (re, *joined))
        })
        .collect()
});

/// 清洗挑战文本
///
/// 输出只包含小写 ASCII 字母和单个空格，首尾无空格。对输出再次调用结果不变。
pub fn normalize(raw: &str) -> String {
    let letters_only: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphabetic() { c } else { ' ' })
        .collect();

    let collapsed = letters_only
        .to_ascii_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    repair_compounds(&collapsed)
}

/// 反复应用修复规则直到不再变化（一次修复可能暴露出另一处）
fn repair_compounds(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let mut next = current.clone();
        for (pattern, joined) in COMPOUND_RULES.iter() {
            next = pattern.replace_all(&next, *joined).into_owned();
        }
        if next == current {
            return current;
        }
        current = next;
    }
}
