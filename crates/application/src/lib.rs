//! 应用层实现。
//!
//! 这里提供围绕领域模型的用例服务：成员加入、私信验证、代词反应和管理命令，
//! 以及对外部协作方（名册数据源、聊天平台）的抽象。

pub mod commands;
pub mod course_lock;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod platform;
pub mod replies;
pub mod roster_source;
pub mod services;

pub use commands::AdminCommand;
pub use course_lock::CourseLocks;
pub use dispatcher::{DispatcherDependencies, EventDispatcher};
pub use error::{ApplicationError, PlatformError, RosterSourceError};
pub use events::{ChannelKind, CommandInvocation, PlatformEvent, ReactionEvent};
pub use platform::{
    ChannelRef, ChatPlatform, LabelSettable, MembershipQueryable, Messenger, RoleHolder,
};
pub use roster_source::RosterSource;
pub use services::{
    AdminCommandService, AttemptReport, PronounService, RoleNames, VerificationService,
};
