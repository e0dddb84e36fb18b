use std::sync::Arc;

use domain::{unmatched_students, Community, CommunityId, Course, MemberId, Roster};

use crate::{
    commands::AdminCommand,
    course_lock::CourseLocks,
    error::{ApplicationError, PlatformError},
    events::CommandInvocation,
    platform::{ChannelRef, ChatPlatform},
    replies,
    roster_source::RosterSource,
    services::RoleNames,
};

pub struct AdminCommandServiceDependencies {
    pub roster_source: Arc<dyn RosterSource>,
    pub platform: Arc<dyn ChatPlatform>,
    pub locks: Arc<CourseLocks>,
    pub roles: RoleNames,
}

/// 仅限 Admin 角色使用的管理命令
pub struct AdminCommandService {
    deps: AdminCommandServiceDependencies,
}

impl AdminCommandService {
    pub fn new(deps: AdminCommandServiceDependencies) -> Self {
        Self { deps }
    }

    async fn community(&self, id: CommunityId) -> Result<Community, ApplicationError> {
        self.deps
            .platform
            .communities()
            .await?
            .into_iter()
            .find(|community| community.id == id)
            .ok_or_else(|| PlatformError::CommunityNotFound(id).into())
    }

    // 权限检查方法
    async fn check_admin_permission(
        &self,
        invocation: &CommandInvocation,
    ) -> Result<(), ApplicationError> {
        let requester = self
            .deps
            .platform
            .member(invocation.community, invocation.requester)
            .await?;

        match requester {
            Some(member) if member.has_role(&self.deps.roles.admin) => Ok(()),
            _ => Err(ApplicationError::unauthorized(format!(
                "{} requires the {} role",
                invocation.name, self.deps.roles.admin
            ))),
        }
    }

    pub async fn execute(&self, invocation: &CommandInvocation) -> Result<(), ApplicationError> {
        self.check_admin_permission(invocation).await?;
        let command = AdminCommand::parse(&invocation.name, &invocation.args)?;
        tracing::info!(
            community = %invocation.community,
            requester = %invocation.requester,
            command = command.name(),
            "执行管理命令"
        );

        let reply_to = invocation.channel_ref();
        match command {
            AdminCommand::Ping => {
                self.deps.platform.send_text(reply_to, "pong!").await?;
            }
            AdminCommand::Say(text) => {
                self.deps.platform.send_text(reply_to, &text).await?;
            }
            AdminCommand::React { message, emojis } => {
                for emoji in &emojis {
                    self.deps
                        .platform
                        .add_reaction(reply_to, message, emoji)
                        .await?;
                }
            }
            AdminCommand::GetUnverified => {
                let report = self.unverified_report(invocation.community).await?;
                tracing::info!(report = %report, "未验证学生");
                self.deps.platform.send_text(reply_to, &report).await?;
            }
            AdminCommand::Reset(member) => {
                self.reset(invocation.community, member).await?;
                self.deps
                    .platform
                    .send_text(
                        reply_to,
                        &format!("member {member} has been reset to unverified"),
                    )
                    .await?;
            }
        }
        Ok(())
    }

    async fn course_and_roster(
        &self,
        community: &Community,
    ) -> Result<(Course, Roster), ApplicationError> {
        let course = self
            .deps
            .roster_source
            .load_course(&community.name)
            .await?
            .ok_or_else(|| {
                ApplicationError::config_missing(&community.name, "course is not registered")
            })?;
        let roster = self
            .deps
            .roster_source
            .load_roster(&course)
            .await?
            .ok_or_else(|| {
                ApplicationError::config_missing(
                    &community.name,
                    format!("roster {} does not exist", course.roster_location),
                )
            })?;
        Ok((course, roster))
    }

    /// 名册中尚未匹配到已验证成员的学生
    pub async fn unverified_report(
        &self,
        community_id: CommunityId,
    ) -> Result<String, ApplicationError> {
        let community = self.community(community_id).await?;
        let (_, roster) = self.course_and_roster(&community).await?;
        let members = self.deps.platform.community_members(community.id).await?;

        let unmatched = unmatched_students(
            &roster,
            &members,
            &self.deps.roles.unverified,
            &self.deps.roles.staff,
        );
        Ok(replies::unverified_report(&unmatched))
    }

    /// 人工撤销验证：恢复 Unverified 角色并清除昵称，使其标识可被重新认领
    pub async fn reset(
        &self,
        community_id: CommunityId,
        member: MemberId,
    ) -> Result<(), ApplicationError> {
        let community = self.community(community_id).await?;
        let _guard = self.deps.locks.acquire(&community.name).await;

        if self
            .deps
            .platform
            .member(community.id, member)
            .await?
            .is_none()
        {
            return Err(PlatformError::MemberNotFound {
                community: community.id,
                member,
            }
            .into());
        }

        self.deps
            .platform
            .add_role(community.id, member, &self.deps.roles.unverified)
            .await?;
        self.deps
            .platform
            .set_display_label(community.id, member, None)
            .await?;
        tracing::warn!(community = %community.name, member = %member, "成员验证已被管理员撤销");
        Ok(())
    }
}
