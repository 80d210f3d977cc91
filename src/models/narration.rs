//! 解说事件
//!
//! 游戏规则引擎产出的可广播事件，文本已经拼好

use serde::Deserialize;

/// 单个解说事件
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NarrationEvent {
    /// 值得单独发帖的里程碑（开局、出局、结算等）
    Milestone {
        #[serde(default)]
        title: Option<String>,
        content: String,
        #[serde(default)]
        submolt: Option<String>,
    },
    /// 值得评论的进展，挂在当前帖子下
    Update {
        content: String,
        #[serde(default)]
        post_id: Option<String>,
    },
}

/// 一局游戏的解说脚本
#[derive(Debug, Clone, Deserialize)]
pub struct NarrationScript {
    /// 游戏会话 ID（仅用于日志关联）
    pub session_id: String,
    #[serde(default)]
    pub events: Vec<NarrationEvent>,
    #[serde(skip)]
    pub file_path: Option<String>,
}
