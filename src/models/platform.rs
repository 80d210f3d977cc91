//! 平台 API 的请求 / 响应类型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// 帖子
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub submolt: Option<JsonValue>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// 评论
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub post_id: Option<JsonValue>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// 发帖请求体
#[derive(Debug, Clone, Serialize)]
pub struct NewPost<'a> {
    pub title: &'a str,
    pub content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submolt: Option<&'a str>,
}

/// 评论请求体
#[derive(Debug, Clone, Serialize)]
pub struct NewComment<'a> {
    pub content: &'a str,
}

/// 平台下发的验证挑战
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VerificationChallenge {
    pub code: String,
    pub challenge: String,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
}

impl VerificationChallenge {
    /// 解析过期时间（RFC 3339），无法解析时返回 None
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.expires_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    /// 相对 `now` 是否已过期
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at_utc().is_some_and(|t| t <= now)
    }
}

/// 提交给 `/verify` 的答案
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationAnswer {
    pub verification_code: String,
    /// 固定保留两位小数
    pub answer: String,
}

/// 发帖响应
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostResponse {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub post: Option<Post>,
    #[serde(default)]
    pub verification_required: bool,
    #[serde(default)]
    pub verification: Option<VerificationChallenge>,
    #[serde(default)]
    pub error: Option<String>,
}

/// 评论响应
///
/// 平台既可能返回 `{ "comment": {...} }` 包装，也可能直接返回评论对象。
#[derive(Debug, Clone)]
pub struct CreateCommentResponse {
    pub success: bool,
    pub comment: Option<Comment>,
    pub verification_required: bool,
    pub verification: Option<VerificationChallenge>,
    pub error: Option<String>,
}

impl CreateCommentResponse {
    pub fn from_value(value: JsonValue) -> serde_json::Result<Self> {
        let success = value
            .get("success")
            .and_then(JsonValue::as_bool)
            .unwrap_or(true);
        let verification_required = value
            .get("verification_required")
            .and_then(JsonValue::as_bool)
            .unwrap_or(false);
        let verification = match value.get("verification") {
            Some(v) if !v.is_null() => Some(serde_json::from_value(v.clone())?),
            _ => None,
        };
        let error = value
            .get("error")
            .and_then(JsonValue::as_str)
            .map(str::to_string);

        let comment = match value.get("comment") {
            Some(c) if !c.is_null() => Some(serde_json::from_value(c.clone())?),
            Some(_) => None,
            None if value.get("id").is_some() => Some(serde_json::from_value(value)?),
            None => None,
        };

        Ok(Self {
            success,
            comment,
            verification_required,
            verification,
            error,
        })
    }
}

/// 搜索响应
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub posts: Vec<Post>,
}

/// 帖子详情响应：`{ "post": {...} }` 或直接是帖子
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PostEnvelope {
    Wrapped { post: Post },
    Bare(Post),
}

impl PostEnvelope {
    pub fn into_post(self) -> Post {
        match self {
            PostEnvelope::Wrapped { post } | PostEnvelope::Bare(post) => post,
        }
    }
}

fn default_true() -> bool {
    true
}

/// 平台 ID 可能是字符串也可能是数字
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match JsonValue::deserialize(deserializer)? {
        JsonValue::String(s) => Ok(s),
        JsonValue::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "无法识别的 ID: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_post_response_with_verification() {
        let response: CreatePostResponse = serde_json::from_value(json!({
            "success": true,
            "post": { "id": 12, "title": "t" },
            "verification_required": true,
            "verification": {
                "code": "abc",
                "challenge": "tWeNtY nEwToNs",
                "expires_at": "2026-01-01T00:00:00Z",
                "instructions": "reply with the answer"
            }
        }))
        .unwrap();

        assert_eq!(response.post.unwrap().id, "12");
        assert!(response.verification_required);
        assert_eq!(response.verification.unwrap().code, "abc");
    }

    #[test]
    fn test_comment_response_shapes() {
        let wrapped = CreateCommentResponse::from_value(json!({
            "success": true,
            "comment": { "id": "c1", "content": "hi" }
        }))
        .unwrap();
        assert_eq!(wrapped.comment.unwrap().id, "c1");

        let bare = CreateCommentResponse::from_value(json!({ "id": "c2" })).unwrap();
        assert!(bare.success);
        assert_eq!(bare.comment.unwrap().id, "c2");
    }

    #[test]
    fn test_challenge_expiry() {
        let challenge = VerificationChallenge {
            code: "x".to_string(),
            challenge: String::new(),
            expires_at: Some("2026-01-01T00:00:00Z".to_string()),
            instructions: None,
        };
        let before = DateTime::parse_from_rfc3339("2025-12-31T23:59:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let after = DateTime::parse_from_rfc3339("2026-01-01T00:01:00Z")
            .unwrap()
            .with_timezone(&Utc);

        assert!(!challenge.is_expired_at(before));
        assert!(challenge.is_expired_at(after));

        let unparseable = VerificationChallenge {
            expires_at: Some("soon".to_string()),
            ..challenge
        };
        assert!(!unparseable.is_expired_at(after));
    }

    #[test]
    fn test_post_envelope() {
        let wrapped: PostEnvelope =
            serde_json::from_value(json!({ "success": true, "post": { "id": "p" } })).unwrap();
        assert_eq!(wrapped.into_post().id, "p");

        let bare: PostEnvelope = serde_json::from_value(json!({ "id": 3 })).unwrap();
        assert_eq!(bare.into_post().id, "3");
    }

    #[test]
    fn test_new_post_omits_missing_submolt() {
        let body = serde_json::to_value(NewPost {
            title: "t",
            content: "c",
            submolt: None,
        })
        .unwrap();
        assert_eq!(body, json!({ "title": "t", "content": "c" }));
    }
}
