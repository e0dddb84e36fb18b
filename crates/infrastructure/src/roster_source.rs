use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use application::{RosterSource, RosterSourceError};
use async_trait::async_trait;
use domain::{Course, Roster, RosterRecord};
use serde::Deserialize;

/// 课程注册表中单门课程的原始格式
#[derive(Debug, Deserialize)]
struct CourseRecord {
    roster_path: String,
    support_email: String,
}

fn unreadable(path: &Path, err: std::io::Error) -> RosterSourceError {
    RosterSourceError::Unreadable {
        location: path.display().to_string(),
        reason: err.to_string(),
    }
}

fn malformed(path: &Path, err: serde_json::Error) -> RosterSourceError {
    RosterSourceError::Malformed {
        location: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// 文件不存在时返回 `None`，其他 I/O 错误照常返回
async fn read_optional(path: &Path) -> Result<Option<String>, RosterSourceError> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(unreadable(path, err)),
    }
}

/// 基于 JSON 文件的课程注册表与名册
///
/// 注册表格式：`{"<社区名称>": {"roster_path": "...", "support_email": "..."}}`，
/// 名册格式：`{"<computing id>": {"name": "...", "role": "..."}}`。
/// 相对的名册路径以注册表所在目录为基准。
#[derive(Debug, Clone)]
pub struct JsonRosterSource {
    registry_path: PathBuf,
}

impl JsonRosterSource {
    pub fn new(registry_path: impl Into<PathBuf>) -> Self {
        Self {
            registry_path: registry_path.into(),
        }
    }

    fn resolve_location(&self, roster_path: &str) -> PathBuf {
        let path = Path::new(roster_path);
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match self.registry_path.parent() {
            Some(dir) => dir.join(path),
            None => path.to_path_buf(),
        }
    }

    async fn load_registry(&self) -> Result<BTreeMap<String, CourseRecord>, RosterSourceError> {
        let Some(contents) = read_optional(&self.registry_path).await? else {
            tracing::warn!(registry = %self.registry_path.display(), "课程注册表不存在");
            return Ok(BTreeMap::new());
        };
        serde_json::from_str(&contents).map_err(|err| malformed(&self.registry_path, err))
    }
}

#[async_trait]
impl RosterSource for JsonRosterSource {
    async fn load_course(&self, community: &str) -> Result<Option<Course>, RosterSourceError> {
        let mut registry = self.load_registry().await?;
        let Some(record) = registry.remove(community) else {
            return Ok(None);
        };

        let location = self.resolve_location(&record.roster_path);
        Ok(Some(Course::new(
            community,
            location.display().to_string(),
            record.support_email,
        )))
    }

    async fn load_roster(&self, course: &Course) -> Result<Option<Roster>, RosterSourceError> {
        let path = Path::new(&course.roster_location);
        let Some(contents) = read_optional(path).await? else {
            return Ok(None);
        };

        let records: BTreeMap<String, RosterRecord> =
            serde_json::from_str(&contents).map_err(|err| malformed(path, err))?;
        let roster = Roster::from_records(records);
        tracing::debug!(
            community = %course.community,
            entries = roster.len(),
            "名册加载完成"
        );
        Ok(Some(roster))
    }
}
