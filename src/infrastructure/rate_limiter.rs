//! 冷却闸门 - 基础设施层
//!
//! 平台对写操作有两条互不相关的频率限制：
//! 每 30 分钟最多一个帖子，每 20 秒最多一条评论。
//! 本模块为两种动作各维护一个"上次成功时间"，并在下一次动作前计算需要等待多久。

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::info;

/// 发帖最小间隔
pub const POST_INTERVAL: Duration = Duration::from_secs(30 * 60);
/// 评论最小间隔
pub const COMMENT_INTERVAL: Duration = Duration::from_secs(20);

/// 受冷却约束的动作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// 发帖
    Post,
    /// 评论
    Comment,
}

impl ActionKind {
    /// 平台规定的最小间隔
    pub fn min_interval(self) -> Duration {
        match self {
            ActionKind::Post => POST_INTERVAL,
            ActionKind::Comment => COMMENT_INTERVAL,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Post => write!(f, "发帖"),
            ActionKind::Comment => write!(f, "评论"),
        }
    }
}

/// 两个独立时钟
#[derive(Debug, Default)]
struct CooldownState {
    last_post: Option<Instant>,
    last_comment: Option<Instant>,
}

impl CooldownState {
    fn slot(&mut self, kind: ActionKind) -> &mut Option<Instant> {
        match kind {
            ActionKind::Post => &mut self.last_post,
            ActionKind::Comment => &mut self.last_comment,
        }
    }
}

/// 冷却闸门
///
/// 克隆后共享同一份状态。时间基于 `tokio::time::Instant`，
/// 因此测试可以用暂停的时钟验证等待时长。
#[derive(Debug, Clone)]
pub struct RateLimiter {
    inner: Arc<Mutex<CooldownState>>,
    post_interval: Duration,
    comment_interval: Duration,
}

impl RateLimiter {
    /// 使用平台固定间隔创建
    pub fn new() -> Self {
        Self::with_intervals(
            ActionKind::Post.min_interval(),
            ActionKind::Comment.min_interval(),
        )
    }

    /// 使用自定义间隔创建
    pub fn with_intervals(post_interval: Duration, comment_interval: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CooldownState::default())),
            post_interval,
            comment_interval,
        }
    }

    /// 该动作类型的最小间隔
    pub fn interval(&self, kind: ActionKind) -> Duration {
        match kind {
            ActionKind::Post => self.post_interval,
            ActionKind::Comment => self.comment_interval,
        }
    }

    /// 现在执行该动作还需等待多久（无需等待时为零）
    pub fn remaining(&self, kind: ActionKind) -> Duration {
        let mut state = self.lock();
        match *state.slot(kind) {
            Some(last) => {
                let elapsed = Instant::now().saturating_duration_since(last);
                self.interval(kind).saturating_sub(elapsed)
            }
            None => Duration::ZERO,
        }
    }

    /// 挂起调用方直到冷却结束，返回实际等待的时长
    pub async fn wait_for(&self, kind: ActionKind) -> Duration {
        let wait = self.remaining(kind);
        if !wait.is_zero() {
            info!("⏳ {}冷却中，等待 {} 秒", kind, wait.as_secs());
            sleep(wait).await;
        }
        wait
    }

    /// 记录一次成功的动作
    pub fn record(&self, kind: ActionKind) {
        *self.lock().slot(kind) = Some(Instant::now());
    }

    fn lock(&self) -> MutexGuard<'_, CooldownState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
