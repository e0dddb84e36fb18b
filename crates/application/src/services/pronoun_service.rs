use std::sync::Arc;

use domain::{decide_reaction_added, decide_reaction_removed, PronounTable, ReactionDecision};

use crate::{
    error::ApplicationError,
    events::ReactionEvent,
    platform::ChatPlatform,
};

/// 代词频道中的反应 -> 角色
pub struct PronounService {
    platform: Arc<dyn ChatPlatform>,
    table: Arc<PronounTable>,
    channel_name: String,
}

impl PronounService {
    pub fn new(
        platform: Arc<dyn ChatPlatform>,
        table: Arc<PronounTable>,
        channel_name: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            table,
            channel_name: channel_name.into(),
        }
    }

    /// 只处理代词频道中其他成员的反应
    async fn applies_to(&self, reaction: &ReactionEvent) -> Result<bool, ApplicationError> {
        if reaction.member == self.platform.current_user() {
            return Ok(false);
        }
        let name = self
            .platform
            .channel_name(reaction.community, reaction.channel)
            .await?;
        Ok(name.as_deref() == Some(self.channel_name.as_str()))
    }

    pub async fn reaction_added(
        &self,
        reaction: &ReactionEvent,
    ) -> Result<ReactionDecision, ApplicationError> {
        if !self.applies_to(reaction).await? {
            return Ok(ReactionDecision::Ignore);
        }

        let decision = decide_reaction_added(&self.table, &reaction.emoji);
        match &decision {
            ReactionDecision::Grant(role) => {
                self.platform
                    .add_role(reaction.community, reaction.member, role)
                    .await?;
                tracing::info!(
                    member = %reaction.member,
                    emoji = %reaction.emoji,
                    role = %role,
                    "授予代词角色"
                );
            }
            ReactionDecision::Retract => {
                self.platform
                    .remove_reaction(
                        reaction.channel_ref(),
                        reaction.message,
                        &reaction.emoji,
                        reaction.member,
                    )
                    .await?;
                tracing::info!(member = %reaction.member, emoji = %reaction.emoji, "撤回无法识别的反应");
            }
            ReactionDecision::Revoke(_) | ReactionDecision::Ignore => {}
        }
        Ok(decision)
    }

    pub async fn reaction_removed(
        &self,
        reaction: &ReactionEvent,
    ) -> Result<ReactionDecision, ApplicationError> {
        if !self.applies_to(reaction).await? {
            return Ok(ReactionDecision::Ignore);
        }

        let decision = decide_reaction_removed(&self.table, &reaction.emoji);
        if let ReactionDecision::Revoke(role) = &decision {
            self.platform
                .remove_role(reaction.community, reaction.member, role)
                .await?;
            tracing::info!(
                member = %reaction.member,
                emoji = %reaction.emoji,
                role = %role,
                "移除代词角色"
            );
        }
        Ok(decision)
    }
}
