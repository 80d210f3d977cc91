//! HTTP 传输 - 基础设施层
//!
//! 持有唯一的 `reqwest::Client`，只暴露"发 JSON 请求"的能力。
//! 路径按段传入，每段单独做百分号编码，调用方传入的 ID 不会改变请求的端点。

use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult, ConfigError};

/// HTTP 传输
///
/// 职责：
/// - 持有 HTTP 客户端、基础地址与可选的 bearer 密钥
/// - 把网络错误和非 2xx 状态转换为 `ApiError`
/// - 不认识帖子 / 评论 / 验证码
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpTransport {
    /// 根据配置创建
    pub fn new(config: &Config) -> AppResult<Self> {
        let trimmed = config.api_base_url.trim_end_matches('/');
        let base_url = match Url::parse(trimmed) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => url,
            _ => {
                return Err(ConfigError::InvalidBaseUrl {
                    url: trimmed.to_string(),
                }
                .into())
            }
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// GET 请求，`query` 作为查询参数
    pub async fn get_json(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> AppResult<JsonValue> {
        let url = self.endpoint_url(segments)?;
        let endpoint = url.path().to_string();
        let builder = self.request(Method::GET, url).query(query);
        self.send(&endpoint, builder).await
    }

    /// POST 请求，`body` 序列化为 JSON
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> AppResult<JsonValue> {
        let url = self.endpoint_url(segments)?;
        let endpoint = url.path().to_string();
        let builder = self.request(Method::POST, url).json(body);
        self.send(&endpoint, builder).await
    }

    /// 在基础地址之后逐段追加路径
    ///
    /// 段内的 `/`、`?`、`#`、`%` 会被编码；空段以及 `.`、`..` 直接拒绝。
    fn endpoint_url(&self, segments: &[&str]) -> AppResult<Url> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(ApiError::InvalidPathSegment {
                segment: bad.to_string(),
            }
            .into());
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ConfigError::InvalidBaseUrl {
                url: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    async fn send(&self, endpoint: &str, builder: RequestBuilder) -> AppResult<JsonValue> {
        let response = builder
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        let text = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        debug!("{} {} -> {}", endpoint, status.as_u16(), text.len());

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ApiError::RateLimited {
                endpoint: endpoint.to_string(),
                retry_after,
            }
            .into());
        }

        if !status.is_success() {
            return Err(ApiError::BadResponse {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message: extract_error_message(&text),
            }
            .into());
        }

        if text.trim().is_empty() {
            return Ok(JsonValue::Null);
        }

        serde_json::from_str(&text).map_err(|e| AppError::json_parse_failed(endpoint, e))
    }
}

/// 从错误响应体中提取可读信息（`error` 或 `message` 字段）
fn extract_error_message(body: &str) -> Option<String> {
    let value: JsonValue = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_base_url_without_scheme() {
        let config = Config::with_base_url("localhost:8080");
        assert!(matches!(
            HttpTransport::new(&config),
            Err(AppError::Config(ConfigError::InvalidBaseUrl { .. }))
        ));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = Config::with_base_url("http://127.0.0.1:9/api/");
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.base_url.as_str(), "http://127.0.0.1:9/api");
    }

    #[test]
    fn test_segments_are_encoded_one_by_one() {
        let config = Config::with_base_url("http://127.0.0.1:9/api/");
        let transport = HttpTransport::new(&config).unwrap();

        let url = transport.endpoint_url(&["posts", "7", "comments"]).unwrap();
        assert_eq!(url.path(), "/api/posts/7/comments");

        let url = transport
            .endpoint_url(&["posts", "x/../../search?q=hi"])
            .unwrap();
        assert_eq!(url.path(), "/api/posts/x%2F..%2F..%2Fsearch%3Fq=hi");
        assert_eq!(url.query(), None);

        let root = HttpTransport::new(&Config::with_base_url("http://127.0.0.1:9")).unwrap();
        assert_eq!(root.endpoint_url(&["verify"]).unwrap().path(), "/verify");
    }

    #[test]
    fn test_dot_segments_are_rejected() {
        let transport = HttpTransport::new(&Config::with_base_url("http://127.0.0.1:9")).unwrap();
        for bad in ["..", ".", ""] {
            assert!(matches!(
                transport.endpoint_url(&["posts", bad]),
                Err(AppError::Api(ApiError::InvalidPathSegment { .. }))
            ));
        }
    }

    #[test]
    fn test_extract_error_message() {
        assert_eq!(
            extract_error_message(r#"{"success":false,"error":"slow down"}"#),
            Some("slow down".to_string())
        );
        assert_eq!(extract_error_message("<html>"), None);
    }

    #[tokio::test]
    async fn test_status_errors_are_typed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/posts/1")
            .with_status(404)
            .with_body(r#"{"error":"not found"}"#)
            .create_async()
            .await;

        let transport = HttpTransport::new(&Config::with_base_url(server.url())).unwrap();
        let err = transport.get_json(&["posts", "1"], &[]).await.unwrap_err();

        match err {
            AppError::Api(ApiError::BadResponse {
                status, message, ..
            }) => {
                assert_eq!(status, 404);
                assert_eq!(message.as_deref(), Some("not found"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_bearer_key_is_sent_when_configured() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/posts/7")
            .match_header("authorization", "Bearer secret")
            .with_status(200)
            .with_body(r#"{"id":"7"}"#)
            .create_async()
            .await;

        let mut config = Config::with_base_url(server.url());
        config.api_key = Some("secret".to_string());
        let transport = HttpTransport::new(&config).unwrap();

        let value = transport.get_json(&["posts", "7"], &[]).await.unwrap();
        assert_eq!(value["id"], "7");
        mock.assert_async().await;
    }
}
