//! 解说广播流程 - 流程层
//!
//! 核心职责：把一局游戏的解说事件按顺序变成平台上的帖子和评论
//!
//! 流程：
//! 1. 里程碑 → 发帖，并成为本局的当前主帖
//! 2. 进展 → 评论到指定帖子，否则评论到当前主帖
//! 3. 两者都没有 → 跳过

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::clients::PlatformClient;
use crate::models::NarrationEvent;
use crate::utils::truncate_text;
use crate::workflow::session_ctx::SessionCtx;

/// 单个事件的广播结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BroadcastOutcome {
    /// 已发帖
    Posted(String),
    /// 已评论
    Commented(String),
    /// 没有可挂靠的帖子
    Skipped,
    /// 平台调用失败（已记录日志）
    Failed,
}

/// 广播统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastStats {
    pub posted: usize,
    pub commented: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BroadcastStats {
    fn record(&mut self, outcome: &BroadcastOutcome) {
        match outcome {
            BroadcastOutcome::Posted(_) => self.posted += 1,
            BroadcastOutcome::Commented(_) => self.commented += 1,
            BroadcastOutcome::Skipped => self.skipped += 1,
            BroadcastOutcome::Failed => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.posted + self.commented + self.skipped + self.failed
    }
}

/// 解说广播流程
///
/// - 编排单局游戏的广播
/// - 不持有 HTTP 资源，只依赖平台客户端
/// - 平台失败不会中断流程
pub struct NarrationFlow {
    client: PlatformClient,
    ctx: SessionCtx,
}

impl NarrationFlow {
    pub fn new(client: PlatformClient, session_id: impl Into<String>) -> Self {
        Self {
            client,
            ctx: SessionCtx::new(session_id),
        }
    }

    pub fn ctx(&self) -> &SessionCtx {
        &self.ctx
    }

    /// 消费事件直到发送端关闭
    pub async fn run(&mut self, mut events: mpsc::Receiver<NarrationEvent>) -> BroadcastStats {
        let mut stats = BroadcastStats::default();
        while let Some(event) = events.recv().await {
            let outcome = self.handle(event).await;
            stats.record(&outcome);
        }
        info!("{} 事件源已关闭，共处理 {} 个事件", self.ctx, stats.total());
        stats
    }

    /// 处理单个事件
    pub async fn handle(&mut self, event: NarrationEvent) -> BroadcastOutcome {
        match event {
            NarrationEvent::Milestone {
                title,
                content,
                submolt,
            } => self.post_milestone(title, &content, submolt.as_deref()).await,
            NarrationEvent::Update { content, post_id } => {
                self.comment_update(post_id, &content).await
            }
        }
    }

    async fn post_milestone(
        &mut self,
        title: Option<String>,
        content: &str,
        submolt: Option<&str>,
    ) -> BroadcastOutcome {
        info!("{} 📣 里程碑: {}", self.ctx, truncate_text(content, 60));

        let post = match title {
            Some(title) => {
                self.client
                    .create_post_with_title(&title, content, submolt)
                    .await
            }
            None => self.client.create_post(content, submolt).await,
        };

        match post {
            Some(post) => {
                info!("{} ✓ 新主帖: {}", self.ctx, post.id);
                self.ctx.thread_post_id = Some(post.id.clone());
                BroadcastOutcome::Posted(post.id)
            }
            None => BroadcastOutcome::Failed,
        }
    }

    async fn comment_update(&mut self, post_id: Option<String>, content: &str) -> BroadcastOutcome {
        let Some(target) = post_id.or_else(|| self.ctx.thread_post_id.clone()) else {
            warn!(
                "{} ⚠️ 没有可评论的帖子，跳过: {}",
                self.ctx,
                truncate_text(content, 60)
            );
            return BroadcastOutcome::Skipped;
        };

        info!("{} 💬 进展 → 帖子 {}", self.ctx, target);

        match self.client.create_comment(&target, content).await {
            Some(comment) => BroadcastOutcome::Commented(comment.id),
            None => BroadcastOutcome::Failed,
        }
    }
}
