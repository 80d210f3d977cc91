/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 平台 API 基础地址
    pub api_base_url: String,
    /// 平台 API 密钥（为空时不带鉴权头）
    pub api_key: Option<String>,
    /// 默认发帖分区
    pub default_submolt: Option<String>,
    /// 单次 HTTP 请求超时（秒）
    pub request_timeout_secs: u64,
    /// 解说脚本（TOML）路径
    pub narration_script: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://www.moltbook.com/api/v1".to_string(),
            api_key: None,
            default_submolt: None,
            request_timeout_secs: 30,
            narration_script: "narration.toml".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("PLATFORM_API_BASE_URL").unwrap_or(default.api_base_url),
            api_key: non_empty_env("PLATFORM_API_KEY").or(default.api_key),
            default_submolt: non_empty_env("PLATFORM_DEFAULT_SUBMOLT").or(default.default_submolt),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            narration_script: std::env::var("NARRATION_SCRIPT").unwrap_or(default.narration_script),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 指向指定地址的配置（测试与嵌入方使用）
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            ..Self::default()
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unauthenticated() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_with_base_url_keeps_defaults() {
        let config = Config::with_base_url("http://127.0.0.1:1234");
        assert_eq!(config.api_base_url, "http://127.0.0.1:1234");
        assert_eq!(config.narration_script, "narration.toml");
    }
}
