//! 社区成员实体定义
//!
//! 成员是否已验证不单独存储：持有 Unverified 角色即未验证，否则视为已验证。

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::value_objects::{CommunityId, MemberId};

/// 社区基本信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    pub id: CommunityId,
    pub name: String,
}

impl Community {
    pub fn new(id: CommunityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// 社区成员快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// 平台用户ID
    pub id: MemberId,
    /// 平台可见的用户名
    pub username: String,
    /// 社区内昵称
    #[serde(default)]
    pub display_label: Option<String>,
    /// 持有的角色名
    #[serde(default)]
    pub roles: BTreeSet<String>,
}

impl Member {
    pub fn new(id: MemberId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            display_label: None,
            roles: BTreeSet::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.display_label = Some(label.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// 未设置昵称时退回到用户名
    pub fn effective_label(&self) -> &str {
        self.display_label.as_deref().unwrap_or(&self.username)
    }

    /// 不持有 Unverified 角色即为已验证
    pub fn is_verified(&self, unverified_tag: &str) -> bool {
        !self.has_role(unverified_tag)
    }
}
