//! 广播会话上下文
//!
//! 封装"我正在为哪一局游戏广播、当前挂在哪个帖子下"这一信息

use std::fmt::Display;

/// 广播会话上下文
///
/// `session_id` 仅用于日志关联，不参与队列与求解逻辑
#[derive(Debug, Clone, Default)]
pub struct SessionCtx {
    /// 游戏会话 ID
    pub session_id: String,

    /// 当前主帖 ID（最近一次里程碑发出的帖子）
    pub thread_post_id: Option<String>,
}

impl SessionCtx {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            thread_post_id: None,
        }
    }
}

impl Display for SessionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[会话 {}]", self.session_id)
    }
}
