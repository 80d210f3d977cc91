/// 社交平台客户端
///
/// 组合冷却闸门、串行动作队列与挑战求解服务，对外提供发帖、评论、查帖、搜索。
/// 所有方法都在边界处吞掉错误：广播只是游戏的附带效果，绝不能打断游戏本身。
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::infrastructure::{ActionKind, ActionQueue, HttpTransport, RateLimiter};
use crate::models::{
    Comment, CreateCommentResponse, CreatePostResponse, NewComment, NewPost, Post, PostEnvelope,
    SearchResponse, VerificationChallenge,
};
use crate::services::ChallengeSolver;
use crate::utils::truncate_text;

/// 由正文推导标题时的最大长度
const TITLE_MAX_CHARS: usize = 80;

/// 平台客户端
///
/// 克隆后共享同一个冷却闸门和同一条出站队列。
#[derive(Clone)]
pub struct PlatformClient {
    transport: HttpTransport,
    limiter: RateLimiter,
    queue: ActionQueue,
    solver: ChallengeSolver,
    default_submolt: Option<String>,
}

impl PlatformClient {
    /// 使用平台固定冷却间隔创建
    pub fn new(config: &Config) -> AppResult<Self> {
        Self::with_rate_limiter(config, RateLimiter::new())
    }

    /// 使用指定的冷却闸门创建
    pub fn with_rate_limiter(config: &Config, limiter: RateLimiter) -> AppResult<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self {
            solver: ChallengeSolver::new(transport.clone()),
            transport,
            limiter,
            queue: ActionQueue::new(),
            default_submolt: config.default_submolt.clone(),
        })
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// 发帖，标题取正文第一行
    pub async fn create_post(&self, content: &str, submolt: Option<&str>) -> Option<Post> {
        let title = derive_title(content);
        self.create_post_with_title(&title, content, submolt).await
    }

    /// 发帖（显式标题）
    pub async fn create_post_with_title(
        &self,
        title: &str,
        content: &str,
        submolt: Option<&str>,
    ) -> Option<Post> {
        match self.try_create_post(title, content, submolt).await {
            Ok(post) => {
                info!("✓ 帖子已发布: {}", post.id);
                Some(post)
            }
            Err(e) => {
                warn!("❌ 发帖失败: {}", e);
                None
            }
        }
    }

    /// 发帖，错误原样返回
    ///
    /// 先等待发帖冷却，再进入出站队列；成功后记录冷却时间。
    /// 响应里带挑战就先求解提交，再检查响应是否带回了帖子。
    pub async fn try_create_post(
        &self,
        title: &str,
        content: &str,
        submolt: Option<&str>,
    ) -> AppResult<Post> {
        const ENDPOINT: &str = "/posts";

        let submolt = submolt.or(self.default_submolt.as_deref());
        let body = serde_json::to_value(NewPost {
            title,
            content,
            submolt,
        })
        .map_err(|e| AppError::json_parse_failed(ENDPOINT, e))?;

        self.limiter.wait_for(ActionKind::Post).await;

        let transport = self.transport.clone();
        let limiter = self.limiter.clone();
        let solver = self.solver.clone();

        self.queue
            .submit(move || async move {
                let value = transport.post_json(&["posts"], &body).await?;
                let response: CreatePostResponse = serde_json::from_value(value)
                    .map_err(|e| AppError::json_parse_failed(ENDPOINT, e))?;

                if !response.success {
                    return Err(rejected(ENDPOINT, response.error));
                }
                limiter.record(ActionKind::Post);

                handle_verification(
                    &solver,
                    response.verification_required,
                    response.verification.as_ref(),
                )
                .await;

                response
                    .post
                    .ok_or_else(|| rejected(ENDPOINT, Some("响应中缺少 post".to_string())))
            })
            .await
    }

    /// 评论
    pub async fn create_comment(&self, post_id: &str, content: &str) -> Option<Comment> {
        match self.try_create_comment(post_id, content).await {
            Ok(comment) => {
                info!("✓ 评论已发布: {} (帖子 {})", comment.id, post_id);
                Some(comment)
            }
            Err(e) => {
                warn!("❌ 评论失败 (帖子 {}): {}", post_id, e);
                None
            }
        }
    }

    /// 评论，错误原样返回
    pub async fn try_create_comment(&self, post_id: &str, content: &str) -> AppResult<Comment> {
        let endpoint = format!("/posts/{}/comments", post_id);
        let post_id = post_id.to_string();
        let body = serde_json::to_value(NewComment { content })
            .map_err(|e| AppError::json_parse_failed(endpoint.as_str(), e))?;

        self.limiter.wait_for(ActionKind::Comment).await;

        let transport = self.transport.clone();
        let limiter = self.limiter.clone();
        let solver = self.solver.clone();

        self.queue
            .submit(move || async move {
                let value = transport
                    .post_json(&["posts", post_id.as_str(), "comments"], &body)
                    .await?;
                let response = CreateCommentResponse::from_value(value)
                    .map_err(|e| AppError::json_parse_failed(endpoint.as_str(), e))?;

                if !response.success {
                    return Err(rejected(&endpoint, response.error));
                }
                limiter.record(ActionKind::Comment);

                handle_verification(
                    &solver,
                    response.verification_required,
                    response.verification.as_ref(),
                )
                .await;

                response
                    .comment
                    .ok_or_else(|| rejected(&endpoint, Some("响应中缺少 comment".to_string())))
            })
            .await
    }

    /// 查帖
    pub async fn get_post(&self, post_id: &str) -> Option<Post> {
        let endpoint = format!("/posts/{}", post_id);
        let result = self
            .transport
            .get_json(&["posts", post_id], &[])
            .await
            .and_then(|value| parse::<PostEnvelope>(&endpoint, value));

        match result {
            Ok(envelope) => Some(envelope.into_post()),
            Err(e) => {
                warn!("⚠️ 获取帖子 {} 失败: {}", post_id, e);
                None
            }
        }
    }

    /// 搜索
    pub async fn search(&self, query: &str) -> Vec<Post> {
        const ENDPOINT: &str = "/search";
        let result = self
            .transport
            .get_json(&["search"], &[("q", query)])
            .await
            .and_then(|value| parse::<SearchResponse>(ENDPOINT, value));

        match result {
            Ok(response) => {
                debug!("搜索 \"{}\" 返回 {} 条", query, response.posts.len());
                response.posts
            }
            Err(e) => {
                warn!("⚠️ 搜索 \"{}\" 失败: {}", query, e);
                Vec::new()
            }
        }
    }
}

/// 响应要求验证时交给求解服务；求解失败不影响已创建的内容
async fn handle_verification(
    solver: &ChallengeSolver,
    required: bool,
    verification: Option<&VerificationChallenge>,
) {
    match verification {
        Some(challenge) => solver.solve_and_submit(challenge).await,
        None if required => warn!("⚠️ 平台要求验证，但响应中没有挑战内容"),
        None => {}
    }
}

fn parse<T: serde::de::DeserializeOwned>(endpoint: &str, value: JsonValue) -> AppResult<T> {
    serde_json::from_value(value).map_err(|e| AppError::json_parse_failed(endpoint, e))
}

fn rejected(endpoint: &str, message: Option<String>) -> AppError {
    ApiError::Rejected {
        endpoint: endpoint.to_string(),
        message,
    }
    .into()
}

/// 取第一行非空文本作为标题
fn derive_title(content: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| truncate_text(line, TITLE_MAX_CHARS))
        .unwrap_or_else(|| "Game update".to_string())
}
