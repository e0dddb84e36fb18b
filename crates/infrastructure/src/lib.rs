//! 基础设施层实现。
//!
//! 提供基于 JSON 文件的课程注册表与名册数据源，以及进程内平台的快照加载，
//! 实现应用层定义的接口。

pub mod builder;
pub mod roster_source;
pub mod snapshot;

pub use builder::{Infrastructure, InfrastructureConfig, InfrastructureError, DEFAULT_BOT_ID};
pub use roster_source::JsonRosterSource;
pub use snapshot::load_platform_snapshot;
