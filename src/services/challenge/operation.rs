//! 运算判定
//!
//! 按顺序检查关键词表，第一个命中的决定运算；都不命中时默认求和。
//! 关键词按整词（或整词组）匹配。

use std::fmt;

/// 挑战要求的运算
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Sum,
    Difference,
    Product,
    Quotient,
}

/// (关键词集合, 运算)，自上而下匹配
pub const OPERATION_KEYWORDS: &[(&[&str], Operation)] = &[
    (
        &["total", "sum", "combined", "together", "add", "adds", "added"],
        Operation::Sum,
    ),
    (
        &[
            "difference",
            "subtract",
            "subtracts",
            "subtracted",
            "subtraction",
            "minus",
            "less than",
        ],
        Operation::Difference,
    ),
    (
        &["product", "multiply", "multiplies", "multiplied", "times"],
        Operation::Product,
    ),
    (
        &["divide", "divides", "divided", "ratio", "quotient"],
        Operation::Quotient,
    ),
];

impl Operation {
    /// 根据清洗后的文本判定运算
    pub fn classify(text: &str) -> Self {
        let padded = format!(" {} ", text);
        OPERATION_KEYWORDS
            .iter()
            .find(|(keywords, _)| {
                keywords
                    .iter()
                    .any(|keyword| padded.contains(&format!(" {} ", keyword)))
            })
            .map(|(_, operation)| *operation)
            .unwrap_or(Operation::Sum)
    }

    /// 对提取到的数字执行运算
    ///
    /// 缺少第二个操作数或除数为零时退化为第一个数，不会报错。
    pub fn apply(self, numbers: &[f64]) -> f64 {
        let first = numbers.first().copied().unwrap_or(0.0);
        match self {
            Operation::Sum => numbers.iter().sum(),
            Operation::Difference => match numbers {
                [a, b, ..] => (a - b).abs(),
                _ => first,
            },
            Operation::Product => {
                if numbers.is_empty() {
                    0.0
                } else {
                    numbers.iter().product()
                }
            }
            Operation::Quotient => match numbers {
                [a, b, ..] if *b != 0.0 => a / b,
                _ => first,
            },
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Sum => write!(f, "求和"),
            Operation::Difference => write!(f, "求差"),
            Operation::Product => write!(f, "求积"),
            Operation::Quotient => write!(f, "求商"),
        }
    }
}
