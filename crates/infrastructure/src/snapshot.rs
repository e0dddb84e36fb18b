use std::path::Path;

use application::platform::memory::{MemoryPlatform, PlatformSnapshot};

use crate::builder::InfrastructureError;

/// 从 JSON 快照构建进程内平台
pub async fn load_platform_snapshot(path: &Path) -> Result<MemoryPlatform, InfrastructureError> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|err| {
        InfrastructureError::SnapshotUnreadable {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    })?;
    let snapshot: PlatformSnapshot =
        serde_json::from_str(&contents).map_err(|err| InfrastructureError::SnapshotMalformed {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;

    tracing::info!(
        snapshot = %path.display(),
        communities = snapshot.communities.len(),
        "平台快照加载完成"
    );
    Ok(MemoryPlatform::from_snapshot(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use application::MembershipQueryable;
    use domain::{ChannelId, CommunityId, MemberId};
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_snapshot_seeds_platform() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("platform.json");
        fs::write(
            &path,
            r#"{
                "bot_id": 1,
                "communities": [{
                    "id": 10,
                    "name": "CS 2100",
                    "roles": ["Unverified", "Admin", "Staff"],
                    "channels": [{"id": 101, "name": "pronouns"}],
                    "members": [{"id": 3, "username": "jane", "roles": ["Unverified"]}]
                }]
            }"#,
        )
        .unwrap();

        let platform = load_platform_snapshot(&path).await.unwrap();

        assert_eq!(platform.current_user(), MemberId(1));
        let member = platform
            .member(CommunityId(10), MemberId(3))
            .await
            .unwrap()
            .unwrap();
        assert!(member.has_role("Unverified"));
        assert_eq!(
            platform
                .channel_name(CommunityId(10), ChannelId(101))
                .await
                .unwrap()
                .as_deref(),
            Some("pronouns")
        );
    }

    #[tokio::test]
    async fn test_missing_snapshot_is_error() {
        let dir = TempDir::new().unwrap();
        let result = load_platform_snapshot(&dir.path().join("absent.json")).await;
        assert!(matches!(
            result,
            Err(InfrastructureError::SnapshotUnreadable { .. })
        ));
    }

    #[tokio::test]
    async fn test_malformed_snapshot_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("platform.json");
        fs::write(&path, r#"{"communities": []}"#).unwrap();

        let result = load_platform_snapshot(&path).await;
        assert!(matches!(
            result,
            Err(InfrastructureError::SnapshotMalformed { .. })
        ));
    }
}
