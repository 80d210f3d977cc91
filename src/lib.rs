//! # Molt Broadcaster
//!
//! 把游戏解说自动广播到社交平台的出站客户端
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `HttpTransport` - 唯一的 HTTP 客户端持有者
//! - `RateLimiter` - 发帖 / 评论两个独立的冷却时钟
//! - `ActionQueue` - 单 worker 的串行出站队列
//!
//! ### ② 业务能力层（Services）
//! - `services::challenge` - 混淆算术题的清洗、数字提取、运算判定
//! - `ChallengeSolver` - 求解并提交验证答案
//!
//! ### ③ 客户端（Clients）
//! - `PlatformClient` - 发帖、评论、查帖、搜索
//!
//! ### ④ 流程层（Workflow）
//! - `NarrationFlow` - 一局游戏的事件 → 帖子 / 评论
//!
//! ### ⑤ 编排层（Orchestration）
//! - `App` - 加载解说脚本并驱动整个广播

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::PlatformClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{ActionKind, ActionQueue, HttpTransport, RateLimiter};
pub use models::{NarrationEvent, NarrationScript, Post};
pub use orchestrator::App;
pub use services::ChallengeSolver;
pub use workflow::{BroadcastStats, NarrationFlow, SessionCtx};
