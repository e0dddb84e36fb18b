//! 事件分发
//!
//! 每种事件类型对应一个处理器。事件按顺序逐个处理，一个事件的全部平台
//! 调用完成后才处理下一个。

use std::sync::Arc;

use domain::PronounTable;

use crate::{
    course_lock::CourseLocks,
    error::ApplicationError,
    events::{ChannelKind, CommandInvocation, PlatformEvent, ReactionEvent},
    platform::ChatPlatform,
    roster_source::RosterSource,
    services::{
        AdminCommandService, AdminCommandServiceDependencies, PronounService, RoleNames,
        VerificationService, VerificationServiceDependencies,
    },
};

pub struct DispatcherDependencies {
    pub roster_source: Arc<dyn RosterSource>,
    pub platform: Arc<dyn ChatPlatform>,
    pub pronouns: Arc<PronounTable>,
    pub pronoun_channel: String,
    pub roles: RoleNames,
}

pub struct EventDispatcher {
    platform: Arc<dyn ChatPlatform>,
    verification: VerificationService,
    pronouns: PronounService,
    admin: AdminCommandService,
}

impl EventDispatcher {
    pub fn new(deps: DispatcherDependencies) -> Self {
        let locks = Arc::new(CourseLocks::new());

        let verification = VerificationService::new(VerificationServiceDependencies {
            roster_source: deps.roster_source.clone(),
            platform: deps.platform.clone(),
            locks: locks.clone(),
            roles: deps.roles.clone(),
        });
        let admin = AdminCommandService::new(AdminCommandServiceDependencies {
            roster_source: deps.roster_source,
            platform: deps.platform.clone(),
            locks,
            roles: deps.roles,
        });
        let pronouns = PronounService::new(
            deps.platform.clone(),
            deps.pronouns,
            deps.pronoun_channel,
        );

        Self {
            platform: deps.platform,
            verification,
            pronouns,
            admin,
        }
    }

    pub fn verification(&self) -> &VerificationService {
        &self.verification
    }

    pub async fn dispatch(&self, event: PlatformEvent) -> Result<(), ApplicationError> {
        match event {
            PlatformEvent::MemberJoined {
                community,
                member,
                ..
            } => {
                self.verification.member_joined(community, member).await
            }
            PlatformEvent::MessageReceived {
                author,
                text,
                channel,
            } => self.on_message(author, &text, channel).await,
            PlatformEvent::ReactionAdded(reaction) => self.on_reaction_added(&reaction).await,
            PlatformEvent::ReactionRemoved(reaction) => self.on_reaction_removed(&reaction).await,
            PlatformEvent::CommandInvoked(invocation) => self.on_command(&invocation).await,
        }
    }

    /// 只有私信参与验证，机器人自己的消息忽略
    async fn on_message(
        &self,
        author: domain::MemberId,
        text: &str,
        channel: ChannelKind,
    ) -> Result<(), ApplicationError> {
        if channel != ChannelKind::Direct || author == self.platform.current_user() {
            return Ok(());
        }
        let reports = self.verification.direct_message(author, text).await?;
        tracing::debug!(member = %author, attempts = reports.len(), "私信处理完成");
        Ok(())
    }

    async fn on_reaction_added(&self, reaction: &ReactionEvent) -> Result<(), ApplicationError> {
        self.pronouns.reaction_added(reaction).await.map(|_| ())
    }

    async fn on_reaction_removed(&self, reaction: &ReactionEvent) -> Result<(), ApplicationError> {
        self.pronouns.reaction_removed(reaction).await.map(|_| ())
    }

    async fn on_command(&self, invocation: &CommandInvocation) -> Result<(), ApplicationError> {
        match self.admin.execute(invocation).await {
            Err(ApplicationError::Unauthorized { action }) => {
                tracing::warn!(
                    requester = %invocation.requester,
                    action = %action,
                    "无权限执行管理命令"
                );
                Err(ApplicationError::Unauthorized { action })
            }
            other => other,
        }
    }
}
