use std::sync::Arc;

use domain::{
    self, fits_label_bound, Community, CommunityId, ComputingId, Course, MemberId, Roster,
    VerificationOutcome,
};

use crate::{
    course_lock::CourseLocks,
    error::{ApplicationError, PlatformError},
    platform::{ChannelRef, ChatPlatform},
    replies,
    roster_source::RosterSource,
    services::RoleNames,
};

pub struct VerificationServiceDependencies {
    pub roster_source: Arc<dyn RosterSource>,
    pub platform: Arc<dyn ChatPlatform>,
    pub locks: Arc<CourseLocks>,
    pub roles: RoleNames,
}

/// 单个社区中一次验证尝试的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptReport {
    pub community: Community,
    pub outcome: VerificationOutcome,
}

pub struct VerificationService {
    deps: VerificationServiceDependencies,
}

impl VerificationService {
    pub fn new(deps: VerificationServiceDependencies) -> Self {
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

    /// 新成员加入：打上 Unverified 角色并私信提示提交学生标识
    pub async fn member_joined(
        &self,
        community_id: CommunityId,
        member: MemberId,
    ) -> Result<(), ApplicationError> {
        let community = self.community(community_id).await?;
        tracing::info!(community = %community.name, member = %member, "新成员加入");

        self.deps
            .platform
            .add_role(community.id, member, &self.deps.roles.unverified)
            .await?;
        self.deps
            .platform
            .send_text(ChannelRef::Direct { member }, &replies::greeting(&community.name))
            .await?;
        Ok(())
    }

    /// 处理私信中提交的学生标识，对作者所在的每个课程社区依次尝试验证。
    ///
    /// 各社区的尝试互不影响：某个社区出错时记录日志并继续下一个，全部处理完
    /// 后返回遇到的第一个错误。
    pub async fn direct_message(
        &self,
        author: MemberId,
        text: &str,
    ) -> Result<Vec<AttemptReport>, ApplicationError> {
        let identifier = ComputingId::normalize(text);
        tracing::info!(member = %author, computing_id = %identifier, "收到私信");

        let mut reports = Vec::new();
        let mut first_error = None;

        for community in self.deps.platform.communities().await? {
            match self.verify_in(&community, author, &identifier).await {
                Ok(Some(outcome)) => reports.push(AttemptReport { community, outcome }),
                Ok(None) => {}
                Err(err) => {
                    tracing::error!(
                        community = %community.name,
                        member = %author,
                        error = %err,
                        "社区验证失败，继续处理其他社区"
                    );
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(reports),
        }
    }

    /// 单个社区内的验证；非课程社区、作者不在社区或名册缺失时返回 `None`
    async fn verify_in(
        &self,
        community: &Community,
        author: MemberId,
        identifier: &ComputingId,
    ) -> Result<Option<VerificationOutcome>, ApplicationError> {
        let Some(course) = self.deps.roster_source.load_course(&community.name).await? else {
            return Ok(None);
        };
        if self.deps.platform.member(community.id, author).await?.is_none() {
            return Ok(None);
        }

        let Some(roster) = self.deps.roster_source.load_roster(&course).await? else {
            tracing::error!(
                community = %community.name,
                roster = %course.roster_location,
                "名册文件不存在，跳过验证"
            );
            self.deps
                .platform
                .send_text(
                    ChannelRef::Direct { member: author },
                    &replies::roster_unavailable(&community.name, &course.support_contact),
                )
                .await?;
            return Ok(None);
        };

        let outcome = self
            .attempt(community, &course, &roster, author, identifier)
            .await?;
        Ok(Some(outcome))
    }

    /// 在课程锁内完成判定与修改，锁释放后再回复用户
    async fn attempt(
        &self,
        community: &Community,
        course: &Course,
        roster: &Roster,
        author: MemberId,
        identifier: &ComputingId,
    ) -> Result<VerificationOutcome, ApplicationError> {
        let reply_to = ChannelRef::Direct { member: author };
        let unverified = &self.deps.roles.unverified;

        let guard = self.deps.locks.acquire(&course.community).await;

        let member = self
            .deps
            .platform
            .member(community.id, author)
            .await?
            .ok_or(PlatformError::MemberNotFound {
                community: community.id,
                member: author,
            })?;
        let members = self.deps.platform.community_members(community.id).await?;

        let outcome = domain::resolve(identifier.as_str(), roster, &member, &members, unverified);

        if outcome == VerificationOutcome::AlreadyVerified {
            drop(guard);
            tracing::info!(community = %community.name, member = %author, "成员已验证");
            self.deps
                .platform
                .send_text(reply_to, &replies::already_verified(&community.name))
                .await?;
            return Ok(outcome);
        }

        if let VerificationOutcome::Success(label) = &outcome {
            if !fits_label_bound(label) {
                tracing::warn!(
                    community = %community.name,
                    member = %author,
                    label = %label,
                    "昵称超出长度上限"
                );
            }
            tracing::info!(
                community = %community.name,
                member = %author,
                computing_id = %identifier,
                "移除 Unverified 角色并设置昵称"
            );
            self.deps
                .platform
                .set_display_label(community.id, author, Some(label))
                .await?;
            self.deps
                .platform
                .remove_role(community.id, author, unverified)
                .await?;
        } else {
            tracing::warn!(
                community = %community.name,
                member = %author,
                computing_id = %identifier,
                outcome = outcome.as_str(),
                "验证未通过"
            );
        }
        drop(guard);

        self.deps
            .platform
            .send_text(reply_to, &replies::verifying(&community.name))
            .await?;
        for message in
            replies::outcome_messages(&outcome, &community.name, &course.support_contact)
        {
            self.deps.platform.send_text(reply_to, &message).await?;
        }

        Ok(outcome)
    }
}
