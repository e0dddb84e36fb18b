use async_trait::async_trait;
use domain::{Course, Roster};

use crate::error::RosterSourceError;

/// 课程与名册数据源
///
/// 每次调用都重新读取，不做缓存。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterSource: Send + Sync {
    /// 按社区名称查找课程配置，未注册时返回 `None`
    async fn load_course(&self, community: &str) -> Result<Option<Course>, RosterSourceError>;

    /// 加载课程名册，名册文件不存在时返回 `None`。
    ///
    /// 空名册是合法的，返回 `Some(Roster::default())`。
    async fn load_roster(&self, course: &Course) -> Result<Option<Roster>, RosterSourceError>;
}
