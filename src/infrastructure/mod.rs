//! 基础设施层
//!
//! 持有稀缺资源（HTTP 客户端、冷却时钟、出站队列），只暴露能力

pub mod action_queue;
pub mod http_transport;
pub mod rate_limiter;

pub use action_queue::ActionQueue;
pub use http_transport::HttpTransport;
pub use rate_limiter::{ActionKind, RateLimiter};
