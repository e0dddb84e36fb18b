//! 主应用程序入口
//!
//! 从标准输入逐行读取 JSON 编码的平台事件，逐个分发处理。

use std::sync::Arc;

use application::{DispatcherDependencies, EventDispatcher, PlatformEvent, RoleNames};
use config::AppConfig;
use domain::PronounTable;
use infrastructure::{Infrastructure, InfrastructureConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig::load()?;
    tracing::info!(registry = %config.courses.registry_path, "配置加载完成");

    let pronouns = PronounTable::new(config.pronoun_pairs())?;
    let infrastructure = Infrastructure::load(InfrastructureConfig::from_app_config(&config)).await?;

    let dispatcher = EventDispatcher::new(DispatcherDependencies {
        roster_source: infrastructure.roster_source_trait(),
        platform: infrastructure.platform_trait(),
        pronouns: Arc::new(pronouns),
        pronoun_channel: config.pronouns.channel.clone(),
        roles: RoleNames {
            unverified: config.roles.unverified.clone(),
            admin: config.roles.admin.clone(),
            staff: config.roles.staff.clone(),
        },
    });

    tracing::info!("UVAuth 已启动，等待事件输入");

    // 单一事件流：一个事件处理完成后才读取下一行
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event: PlatformEvent = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!(error = %err, "无法解析事件，已跳过");
                continue;
            }
        };

        let kind = event.kind();
        if let Err(err) = infrastructure.platform.observe(&event).await {
            tracing::warn!(event = kind, error = %err, "平台状态登记失败");
        }
        if let Err(err) = dispatcher.dispatch(event).await {
            tracing::error!(event = kind, error = %err, "事件处理失败");
        }
    }

    tracing::info!("输入结束，退出");
    Ok(())
}
