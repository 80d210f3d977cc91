use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 平台 API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 验证挑战错误
    #[error("验证错误: {0}")]
    Verification(#[from] VerificationError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 动作队列错误（动作 panic 或结果通道被丢弃）
    #[error("队列错误: {0}")]
    Queue(String),
}

/// 平台 API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// API 返回非 2xx 状态
    #[error("API返回错误响应 ({endpoint}): status={status}, message={message:?}")]
    BadResponse {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    /// 请求频率限制
    #[error("API请求频率限制 ({endpoint}), 建议等待: {retry_after:?}秒")]
    RateLimited {
        endpoint: String,
        retry_after: Option<u64>,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    /// 路径段不能作为单个 URL 段使用
    #[error("非法的路径段: {segment:?}")]
    InvalidPathSegment { segment: String },
    /// 2xx 响应但 success=false
    #[error("平台拒绝请求 ({endpoint}): {message:?}")]
    Rejected {
        endpoint: String,
        message: Option<String>,
    },
}

/// 验证挑战错误
#[derive(Debug, Error)]
pub enum VerificationError {
    /// 挑战文本中没有可提取的数字
    #[error("挑战文本中未找到数字: {challenge}")]
    NoNumbers { challenge: String },
    /// 计算结果不是有限数
    #[error("计算结果无效: {value}")]
    NonFinite { value: f64 },
    /// 挑战已过期
    #[error("验证码 {code} 已于 {expires_at} 过期")]
    Expired { code: String, expires_at: String },
    /// 提交答案失败
    #[error("提交验证答案失败: {0}")]
    Submit(#[source] Box<AppError>),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// HTTP 客户端构建失败
    #[error("HTTP客户端构建失败: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// 基础地址不合法
    #[error("API基础地址不合法: {url}")]
    InvalidBaseUrl { url: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建JSON解析错误
    pub fn json_parse_failed(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建队列错误
    pub fn queue(message: impl Into<String>) -> Self {
        AppError::Queue(message.into())
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
