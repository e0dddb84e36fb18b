use std::{path::PathBuf, sync::Arc};

use application::{platform::memory::MemoryPlatform, ChatPlatform, RosterSource};
use config::AppConfig;
use domain::MemberId;
use thiserror::Error;

use crate::{roster_source::JsonRosterSource, snapshot::load_platform_snapshot};

/// 没有快照时机器人使用的成员 ID
pub const DEFAULT_BOT_ID: MemberId = MemberId(0);

#[derive(Debug, Clone)]
pub struct InfrastructureConfig {
    pub registry_path: PathBuf,
    pub snapshot_path: Option<PathBuf>,
}

impl InfrastructureConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            registry_path: PathBuf::from(&config.courses.registry_path),
            snapshot_path: config.platform.snapshot_path.as_ref().map(PathBuf::from),
        }
    }
}

impl Default for InfrastructureConfig {
    fn default() -> Self {
        Self {
            registry_path: PathBuf::from("./courses.json"),
            snapshot_path: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum InfrastructureError {
    #[error("cannot read snapshot {path}: {reason}")]
    SnapshotUnreadable { path: String, reason: String },
    #[error("malformed snapshot {path}: {reason}")]
    SnapshotMalformed { path: String, reason: String },
}

#[derive(Clone)]
pub struct Infrastructure {
    pub roster_source: Arc<JsonRosterSource>,
    pub platform: Arc<MemoryPlatform>,
}

impl Infrastructure {
    pub async fn load(config: InfrastructureConfig) -> Result<Self, InfrastructureError> {
        let roster_source = Arc::new(JsonRosterSource::new(config.registry_path));

        let platform = match &config.snapshot_path {
            Some(path) => load_platform_snapshot(path).await?,
            None => {
                tracing::warn!("未配置平台快照，使用空平台");
                MemoryPlatform::new(DEFAULT_BOT_ID)
            }
        };

        Ok(Self {
            roster_source,
            platform: Arc::new(platform),
        })
    }
}

impl Infrastructure {
    pub fn roster_source_trait(&self) -> Arc<dyn RosterSource> {
        self.roster_source.clone()
    }

    pub fn platform_trait(&self) -> Arc<dyn ChatPlatform> {
        self.platform.clone()
    }
}
