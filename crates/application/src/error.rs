use domain::{CommunityId, DomainError, MemberId};
use thiserror::Error;

/// 平台协作方返回的错误，对应角色/昵称修改被拒绝等情况
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    #[error("community {0} not found")]
    CommunityNotFound(CommunityId),
    #[error("member {member} not found in community {community}")]
    MemberNotFound {
        community: CommunityId,
        member: MemberId,
    },
    #[error("role `{role}` not found in community {community}")]
    RoleNotFound { community: CommunityId, role: String },
    #[error("channel not found: {0}")]
    ChannelNotFound(String),
    #[error("platform rejected {action}: {reason}")]
    Rejected { action: String, reason: String },
}

impl PlatformError {
    pub fn rejected(action: impl Into<String>, reason: impl Into<String>) -> Self {
        PlatformError::Rejected {
            action: action.into(),
            reason: reason.into(),
        }
    }
}

/// 课程注册表或名册文件读取失败。
///
/// 课程不存在、名册文件不存在不属于错误，由 `Ok(None)` 表示。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterSourceError {
    #[error("cannot read {location}: {reason}")]
    Unreadable { location: String, reason: String },
    #[error("malformed {location}: {reason}")]
    Malformed { location: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),
    #[error("roster source error: {0}")]
    RosterSource(#[from] RosterSourceError),
    #[error("configuration missing for {community}: {reason}")]
    ConfigMissing { community: String, reason: String },
    #[error("authorization failed: {action}")]
    Unauthorized { action: String },
    #[error("invalid command: {0}")]
    InvalidCommand(String),
}

impl ApplicationError {
    /// 创建配置缺失错误
    pub fn config_missing(community: impl Into<String>, reason: impl Into<String>) -> Self {
        ApplicationError::ConfigMissing {
            community: community.into(),
            reason: reason.into(),
        }
    }

    pub fn unauthorized(action: impl Into<String>) -> Self {
        ApplicationError::Unauthorized {
            action: action.into(),
        }
    }

    pub fn invalid_command(message: impl Into<String>) -> Self {
        ApplicationError::InvalidCommand(message.into())
    }
}
