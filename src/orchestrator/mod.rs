//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (加载脚本、投递事件、统计)
//!     ↓
//! workflow::NarrationFlow (处理单个解说事件)
//!     ↓
//! clients::PlatformClient (冷却 → 排队 → HTTP → 验证)
//!     ↓
//! services (能力层：challenge 求解)
//!     ↓
//! infrastructure (基础设施：HttpTransport / RateLimiter / ActionQueue)
//! ```
//!
//! ## 设计原则
//!
//! 1. **资源隔离**：只有编排层持有 `PlatformClient`
//! 2. **向下依赖**：编排层 → workflow → clients → services → infrastructure
//! 3. **无业务逻辑**：只做调度和统计

pub mod app;

pub use app::App;
