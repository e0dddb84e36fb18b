//! 课程实体定义

use serde::{Deserialize, Serialize};

/// 课程配置，每个社区最多对应一门课程，加载后不可变。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// 社区名称（课程注册表中的键）
    pub community: String,
    /// 名册文件位置
    pub roster_location: String,
    /// 人工处理时的联系方式
    pub support_contact: String,
}

impl Course {
    pub fn new(
        community: impl Into<String>,
        roster_location: impl Into<String>,
        support_contact: impl Into<String>,
    ) -> Self {
        Self {
            community: community.into(),
            roster_location: roster_location.into(),
            support_contact: support_contact.into(),
        }
    }
}
