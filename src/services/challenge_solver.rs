//! 挑战求解服务 - 业务能力层
//!
//! 只负责"解一道验证题并提交答案"，不关心帖子或评论本身

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::VerificationError;
use crate::infrastructure::HttpTransport;
use crate::models::{VerificationAnswer, VerificationChallenge};
use crate::services::challenge;
use crate::utils::truncate_text;

/// 挑战求解服务
///
/// 职责：
/// - 清洗 → 提取 → 判定 → 计算 → 提交 `/verify`
/// - 任何一步失败都只记录警告，不向上抛出
/// - 失败时触发挑战的帖子可能一直处于待验证状态，这是可接受的
#[derive(Clone)]
pub struct ChallengeSolver {
    transport: HttpTransport,
}

impl ChallengeSolver {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// 求解并提交（尽力而为）
    pub async fn solve_and_submit(&self, challenge: &VerificationChallenge) {
        match self.try_solve_and_submit(challenge).await {
            Ok(answer) => info!(
                "🔐 验证码 {} 已提交答案 {}",
                answer.verification_code, answer.answer
            ),
            Err(e) => warn!("⚠️ 验证挑战处理失败，内容可能保持待验证状态: {}", e),
        }
    }

    /// 求解并提交，返回已提交的答案
    pub async fn try_solve_and_submit(
        &self,
        challenge: &VerificationChallenge,
    ) -> Result<VerificationAnswer, VerificationError> {
        if challenge.is_expired_at(Utc::now()) {
            return Err(VerificationError::Expired {
                code: challenge.code.clone(),
                expires_at: challenge.expires_at.clone().unwrap_or_default(),
            });
        }

        let answer = Self::answer_for(challenge)?;

        self.transport
            .post_json(&["verify"], &answer)
            .await
            .map_err(|e| VerificationError::Submit(Box::new(e)))?;

        Ok(answer)
    }

    /// 只求解，不提交
    pub fn answer_for(
        challenge: &VerificationChallenge,
    ) -> Result<VerificationAnswer, VerificationError> {
        debug!(
            "🔐 收到验证挑战 {}: {}",
            challenge.code,
            truncate_text(&challenge.challenge, 120)
        );

        let solution = challenge::solve(&challenge.challenge)?;

        debug!(
            "清洗后: {} | 数字: {:?} | 运算: {}",
            solution.normalized, solution.numbers, solution.operation
        );

        Ok(VerificationAnswer {
            verification_code: challenge.code.clone(),
            answer: solution.answer(),
        })
    }
}
