//! 应用编排 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：输出启动信息、创建平台客户端
//! 2. **加载脚本**：读取一局游戏的解说脚本（TOML）
//! 3. **事件投递**：通过 channel 把事件交给 `NarrationFlow`，模拟游戏实时产出事件
//! 4. **全局统计**：汇总本局的广播结果
//!
//! ## 设计特点
//!
//! - **资源所有者**：唯一持有 `PlatformClient` 的模块
//! - **向下委托**：单个事件的处理交给 workflow

use std::path::Path;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::clients::PlatformClient;
use crate::config::Config;
use crate::models::{load_narration_script, NarrationScript};
use crate::utils::logging::{log_startup, print_final_stats};
use crate::workflow::{BroadcastStats, NarrationFlow};

/// 事件 channel 容量
const EVENT_BUFFER: usize = 32;

/// 应用主结构
pub struct App {
    config: Config,
    client: PlatformClient,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let client = PlatformClient::new(&config).context("无法创建平台客户端")?;

        Ok(Self { config, client })
    }

    /// 使用已有客户端创建（测试与嵌入方使用）
    pub fn with_client(config: Config, client: PlatformClient) -> Self {
        Self { config, client }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<BroadcastStats> {
        let script = load_narration_script(Path::new(&self.config.narration_script)).await?;

        if script.events.is_empty() {
            warn!("⚠️ 解说脚本中没有事件，程序结束");
            return Ok(BroadcastStats::default());
        }

        let session_id = script.session_id.clone();
        let stats = self.broadcast(script).await?;

        print_final_stats(&session_id, &stats);
        Ok(stats)
    }

    /// 广播一局游戏的全部事件
    pub async fn broadcast(&self, script: NarrationScript) -> Result<BroadcastStats> {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let mut flow = NarrationFlow::new(self.client.clone(), script.session_id.clone());

        info!(
            "{} 开始广播 {} 个事件",
            flow.ctx(),
            script.events.len()
        );

        let producer = tokio::spawn(async move {
            for event in script.events {
                if tx.send(event).await.is_err() {
                    error!("事件接收端已关闭，停止投递");
                    break;
                }
            }
        });

        let stats = flow.run(rx).await;
        producer.await.context("事件投递任务异常退出")?;

        Ok(stats)
    }
}
