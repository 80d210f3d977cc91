//! 验证挑战求解
//!
//! 平台的反自动化挑战是一道被混淆过的英文算术题：
//! 大小写混杂、夹杂标点、复合词被拆开、穿插无关的填充词。
//!
//! 求解流程：清洗 → 提取数字 → 判定运算 → 计算 → 保留两位小数。
//! 这是尽力而为的启发式，不是通用的自然语言解析器。

pub mod normalizer;
pub mod number_extractor;
pub mod operation;

pub use normalizer::normalize;
pub use number_extractor::extract_numbers;
pub use operation::Operation;

use crate::error::VerificationError;

/// 一次求解的中间结果与答案
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub normalized: String,
    pub numbers: Vec<f64>,
    pub operation: Operation,
    pub value: f64,
}

impl Solution {
    /// 提交格式的答案（两位小数）
    pub fn answer(&self) -> String {
        format_answer(self.value)
    }
}

/// 求解原始挑战文本
pub fn solve(raw: &str) -> Result<Solution, VerificationError> {
    let normalized = normalize(raw);
    let numbers = extract_numbers(&normalized);
    if numbers.is_empty() {
        return Err(VerificationError::NoNumbers {
            challenge: raw.to_string(),
        });
    }

    // 运算只判定一次
    let operation = Operation::classify(&normalized);
    let value = operation.apply(&numbers);
    if !value.is_finite() {
        return Err(VerificationError::NonFinite { value });
    }

    Ok(Solution {
        normalized,
        numbers,
        operation,
        value,
    })
}

/// 固定两位小数，整数结果也一样
pub fn format_answer(value: f64) -> String {
    format!("{:.2}", value)
}
