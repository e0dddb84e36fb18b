//! 聊天平台能力接口
//!
//! 验证逻辑只依赖这里定义的窄接口，真实平台连接由外部适配器实现。

use std::fmt;

use async_trait::async_trait;
use domain::{ChannelId, Community, CommunityId, Member, MemberId, MessageId};
use serde::{Deserialize, Serialize};

use crate::error::PlatformError;

/// 消息发送目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChannelRef {
    /// 与成员的私信
    Direct { member: MemberId },
    /// 社区内频道
    Community {
        community: CommunityId,
        channel: ChannelId,
    },
}

impl fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelRef::Direct { member } => write!(f, "dm:{}", member),
            ChannelRef::Community { community, channel } => {
                write!(f, "{}/{}", community, channel)
            }
        }
    }
}

/// 查询社区与成员
#[async_trait]
pub trait MembershipQueryable: Send + Sync {
    /// 机器人自身的用户ID
    fn current_user(&self) -> MemberId;

    /// 机器人所在的全部社区
    async fn communities(&self) -> Result<Vec<Community>, PlatformError>;

    /// 社区当前的全部成员
    async fn community_members(&self, community: CommunityId) -> Result<Vec<Member>, PlatformError>;

    async fn member(
        &self,
        community: CommunityId,
        member: MemberId,
    ) -> Result<Option<Member>, PlatformError>;

    async fn channel_name(
        &self,
        community: CommunityId,
        channel: ChannelId,
    ) -> Result<Option<String>, PlatformError>;
}

/// 修改成员角色
#[async_trait]
pub trait RoleHolder: Send + Sync {
    async fn add_role(
        &self,
        community: CommunityId,
        member: MemberId,
        role: &str,
    ) -> Result<(), PlatformError>;

    async fn remove_role(
        &self,
        community: CommunityId,
        member: MemberId,
        role: &str,
    ) -> Result<(), PlatformError>;
}

/// 修改成员昵称，`None` 表示清除昵称
#[async_trait]
pub trait LabelSettable: Send + Sync {
    async fn set_display_label(
        &self,
        community: CommunityId,
        member: MemberId,
        label: Option<&str>,
    ) -> Result<(), PlatformError>;
}

/// 发送消息与反应
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_text(&self, channel: ChannelRef, text: &str) -> Result<(), PlatformError>;

    async fn add_reaction(
        &self,
        channel: ChannelRef,
        message: MessageId,
        emoji: &str,
    ) -> Result<(), PlatformError>;

    async fn remove_reaction(
        &self,
        channel: ChannelRef,
        message: MessageId,
        emoji: &str,
        member: MemberId,
    ) -> Result<(), PlatformError>;
}

/// 完整的平台能力集合
pub trait ChatPlatform: MembershipQueryable + RoleHolder + LabelSettable + Messenger {}

impl<T> ChatPlatform for T where T: MembershipQueryable + RoleHolder + LabelSettable + Messenger {}

/// 进程内平台实现，用于驱动程序和测试
pub mod memory {
    use super::*;
    use crate::events::PlatformEvent;
    use std::collections::{BTreeMap, BTreeSet, HashMap};
    use tokio::sync::RwLock;

    /// 频道快照
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ChannelSnapshot {
        pub id: ChannelId,
        pub name: String,
    }

    /// 社区快照
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CommunitySnapshot {
        pub id: CommunityId,
        pub name: String,
        #[serde(default)]
        pub roles: Vec<String>,
        #[serde(default)]
        pub channels: Vec<ChannelSnapshot>,
        #[serde(default)]
        pub members: Vec<Member>,
    }

    /// 平台整体快照
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PlatformSnapshot {
        pub bot_id: MemberId,
        #[serde(default)]
        pub communities: Vec<CommunitySnapshot>,
    }

    /// 记录下来的对外调用
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum OutboundAction {
        SendText {
            channel: ChannelRef,
            text: String,
        },
        AddRole {
            community: CommunityId,
            member: MemberId,
            role: String,
        },
        RemoveRole {
            community: CommunityId,
            member: MemberId,
            role: String,
        },
        SetLabel {
            community: CommunityId,
            member: MemberId,
            label: Option<String>,
        },
        AddReaction {
            channel: ChannelRef,
            message: MessageId,
            emoji: String,
        },
        RemoveReaction {
            channel: ChannelRef,
            message: MessageId,
            emoji: String,
            member: MemberId,
        },
    }

    struct CommunityState {
        name: String,
        roles: BTreeSet<String>,
        channels: HashMap<ChannelId, String>,
        members: BTreeMap<MemberId, Member>,
    }

    pub struct MemoryPlatform {
        bot_id: MemberId,
        communities: RwLock<BTreeMap<CommunityId, CommunityState>>,
        actions: RwLock<Vec<OutboundAction>>,
        recording: bool,
        rejection: RwLock<Option<String>>,
    }

    impl MemoryPlatform {
        pub fn new(bot_id: MemberId) -> Self {
            Self {
                bot_id,
                communities: RwLock::new(BTreeMap::new()),
                actions: RwLock::new(Vec::new()),
                recording: false,
                rejection: RwLock::new(None),
            }
        }

        pub fn from_snapshot(snapshot: PlatformSnapshot) -> Self {
            let communities = snapshot
                .communities
                .into_iter()
                .map(|community| {
                    let state = CommunityState {
                        name: community.name,
                        roles: community.roles.into_iter().collect(),
                        channels: community
                            .channels
                            .into_iter()
                            .map(|channel| (channel.id, channel.name))
                            .collect(),
                        members: community
                            .members
                            .into_iter()
                            .map(|member| (member.id, member))
                            .collect(),
                    };
                    (community.id, state)
                })
                .collect();

            Self {
                bot_id: snapshot.bot_id,
                communities: RwLock::new(communities),
                actions: RwLock::new(Vec::new()),
                recording: false,
                rejection: RwLock::new(None),
            }
        }

        /// 保留对外调用记录，供 `actions` / `texts_to` 查询
        pub fn with_recording(mut self) -> Self {
            self.recording = true;
            self
        }

        /// 在分发之前登记事件带来的成员变化。
        ///
        /// 新加入的成员若尚不存在则以事件中的用户名（缺省为成员 ID）登记，
        /// 已存在的成员保持不变。
        pub async fn observe(&self, event: &PlatformEvent) -> Result<(), PlatformError> {
            let PlatformEvent::MemberJoined {
                community,
                member,
                username,
            } = event
            else {
                return Ok(());
            };

            let mut communities = self.communities.write().await;
            let state = communities
                .get_mut(community)
                .ok_or(PlatformError::CommunityNotFound(*community))?;
            state.members.entry(*member).or_insert_with(|| {
                let name = username.clone().unwrap_or_else(|| member.to_string());
                tracing::debug!(community = %community, member = %member, "登记新成员");
                Member::new(*member, name)
            });
            Ok(())
        }

        /// 之后的所有修改调用都被拒绝，`None` 恢复正常
        pub async fn reject_mutations(&self, reason: Option<String>) {
            *self.rejection.write().await = reason;
        }

        /// 已记录的对外调用
        pub async fn actions(&self) -> Vec<OutboundAction> {
            self.actions.read().await.clone()
        }

        /// 发往指定目标的文本
        pub async fn texts_to(&self, channel: ChannelRef) -> Vec<String> {
            self.actions
                .read()
                .await
                .iter()
                .filter_map(|action| match action {
                    OutboundAction::SendText { channel: to, text } if *to == channel => {
                        Some(text.clone())
                    }
                    _ => None,
                })
                .collect()
        }

        async fn record(&self, action: OutboundAction) {
            tracing::debug!(?action, "平台调用");
            if self.recording {
                self.actions.write().await.push(action);
            }
        }

        /// 每次修改前先让出执行权，使并发交错可以在测试中复现
        async fn begin_mutation(&self, action: &str) -> Result<(), PlatformError> {
            tokio::task::yield_now().await;
            match self.rejection.read().await.as_ref() {
                Some(reason) => Err(PlatformError::rejected(action, reason.clone())),
                None => Ok(()),
            }
        }

        async fn update_member<F>(
            &self,
            community: CommunityId,
            member: MemberId,
            role: Option<&str>,
            apply: F,
        ) -> Result<(), PlatformError>
        where
            F: FnOnce(&mut Member) + Send,
        {
            let mut communities = self.communities.write().await;
            let state = communities
                .get_mut(&community)
                .ok_or(PlatformError::CommunityNotFound(community))?;
            if let Some(role) = role {
                if !state.roles.contains(role) {
                    return Err(PlatformError::RoleNotFound {
                        community,
                        role: role.to_string(),
                    });
                }
            }
            let target = state
                .members
                .get_mut(&member)
                .ok_or(PlatformError::MemberNotFound { community, member })?;
            apply(target);
            Ok(())
        }

        async fn ensure_channel(&self, channel: ChannelRef) -> Result<(), PlatformError> {
            if let ChannelRef::Community { community, channel: id } = channel {
                let communities = self.communities.read().await;
                let known = communities
                    .get(&community)
                    .map(|state| state.channels.contains_key(&id))
                    .unwrap_or(false);
                if !known {
                    return Err(PlatformError::ChannelNotFound(channel.to_string()));
                }
            }
            Ok(())
        }
    }

    #[async_trait]
    impl MembershipQueryable for MemoryPlatform {
        fn current_user(&self) -> MemberId {
            self.bot_id
        }

        async fn communities(&self) -> Result<Vec<Community>, PlatformError> {
            Ok(self
                .communities
                .read()
                .await
                .iter()
                .map(|(id, state)| Community::new(*id, state.name.clone()))
                .collect())
        }

        async fn community_members(
            &self,
            community: CommunityId,
        ) -> Result<Vec<Member>, PlatformError> {
            let communities = self.communities.read().await;
            let state = communities
                .get(&community)
                .ok_or(PlatformError::CommunityNotFound(community))?;
            Ok(state.members.values().cloned().collect())
        }

        async fn member(
            &self,
            community: CommunityId,
            member: MemberId,
        ) -> Result<Option<Member>, PlatformError> {
            let communities = self.communities.read().await;
            let state = communities
                .get(&community)
                .ok_or(PlatformError::CommunityNotFound(community))?;
            Ok(state.members.get(&member).cloned())
        }

        async fn channel_name(
            &self,
            community: CommunityId,
            channel: ChannelId,
        ) -> Result<Option<String>, PlatformError> {
            let communities = self.communities.read().await;
            let state = communities
                .get(&community)
                .ok_or(PlatformError::CommunityNotFound(community))?;
            Ok(state.channels.get(&channel).cloned())
        }
    }

    #[async_trait]
    impl RoleHolder for MemoryPlatform {
        async fn add_role(
            &self,
            community: CommunityId,
            member: MemberId,
            role: &str,
        ) -> Result<(), PlatformError> {
            self.begin_mutation("add_role").await?;
            self.update_member(community, member, Some(role), |target| {
                target.roles.insert(role.to_string());
            })
            .await?;
            self.record(OutboundAction::AddRole {
                community,
                member,
                role: role.to_string(),
            })
            .await;
            Ok(())
        }

        async fn remove_role(
            &self,
            community: CommunityId,
            member: MemberId,
            role: &str,
        ) -> Result<(), PlatformError> {
            self.begin_mutation("remove_role").await?;
            self.update_member(community, member, Some(role), |target| {
                target.roles.remove(role);
            })
            .await?;
            self.record(OutboundAction::RemoveRole {
                community,
                member,
                role: role.to_string(),
            })
            .await;
            Ok(())
        }
    }

    #[async_trait]
    impl LabelSettable for MemoryPlatform {
        async fn set_display_label(
            &self,
            community: CommunityId,
            member: MemberId,
            label: Option<&str>,
        ) -> Result<(), PlatformError> {
            self.begin_mutation("set_display_label").await?;
            let label = label.map(str::to_string);
            let applied = label.clone();
            self.update_member(community, member, None, move |target| {
                target.display_label = applied;
            })
            .await?;
            self.record(OutboundAction::SetLabel {
                community,
                member,
                label,
            })
            .await;
            Ok(())
        }
    }

    #[async_trait]
    impl Messenger for MemoryPlatform {
        async fn send_text(&self, channel: ChannelRef, text: &str) -> Result<(), PlatformError> {
            self.ensure_channel(channel).await?;
            self.record(OutboundAction::SendText {
                channel,
                text: text.to_string(),
            })
            .await;
            Ok(())
        }

        async fn add_reaction(
            &self,
            channel: ChannelRef,
            message: MessageId,
            emoji: &str,
        ) -> Result<(), PlatformError> {
            self.begin_mutation("add_reaction").await?;
            self.ensure_channel(channel).await?;
            self.record(OutboundAction::AddReaction {
                channel,
                message,
                emoji: emoji.to_string(),
            })
            .await;
            Ok(())
        }

        async fn remove_reaction(
            &self,
            channel: ChannelRef,
            message: MessageId,
            emoji: &str,
            member: MemberId,
        ) -> Result<(), PlatformError> {
            self.begin_mutation("remove_reaction").await?;
            self.ensure_channel(channel).await?;
            self.record(OutboundAction::RemoveReaction {
                channel,
                message,
                emoji: emoji.to_string(),
                member,
            })
            .await;
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn platform() -> MemoryPlatform {
            MemoryPlatform::from_snapshot(PlatformSnapshot {
                bot_id: MemberId(1),
                communities: vec![CommunitySnapshot {
                    id: CommunityId(10),
                    name: "CS 2100".to_string(),
                    roles: vec!["Unverified".to_string()],
                    channels: vec![ChannelSnapshot {
                        id: ChannelId(100),
                        name: "pronouns".to_string(),
                    }],
                    members: vec![Member::new(MemberId(2), "jane")],
                }],
            })
            .with_recording()
        }

        #[tokio::test]
        async fn test_role_mutation_updates_member() {
            let platform = platform();
            platform
                .add_role(CommunityId(10), MemberId(2), "Unverified")
                .await
                .unwrap();

            let member = platform
                .member(CommunityId(10), MemberId(2))
                .await
                .unwrap()
                .unwrap();
            assert!(member.has_role("Unverified"));
            assert_eq!(platform.actions().await.len(), 1);
        }

        #[tokio::test]
        async fn test_unknown_role_is_rejected() {
            let platform = platform();
            let result = platform
                .add_role(CommunityId(10), MemberId(2), "Admin")
                .await;
            assert!(matches!(result, Err(PlatformError::RoleNotFound { .. })));
            assert!(platform.actions().await.is_empty());
        }

        #[tokio::test]
        async fn test_rejection_switch() {
            let platform = platform();
            platform.reject_mutations(Some("missing permissions".into())).await;
            let result = platform
                .set_display_label(CommunityId(10), MemberId(2), Some("Jane"))
                .await;
            assert!(matches!(result, Err(PlatformError::Rejected { .. })));

            platform.reject_mutations(None).await;
            platform
                .set_display_label(CommunityId(10), MemberId(2), Some("Jane"))
                .await
                .unwrap();
            let member = platform
                .member(CommunityId(10), MemberId(2))
                .await
                .unwrap()
                .unwrap();
            assert_eq!(member.display_label.as_deref(), Some("Jane"));
        }

        #[tokio::test]
        async fn test_actions_are_not_kept_without_recording() {
            let platform = MemoryPlatform::from_snapshot(PlatformSnapshot {
                bot_id: MemberId(1),
                communities: vec![CommunitySnapshot {
                    id: CommunityId(10),
                    name: "CS 2100".to_string(),
                    roles: vec!["Unverified".to_string()],
                    channels: vec![],
                    members: vec![],
                }],
            });
            for id in 2..200 {
                let event = PlatformEvent::MemberJoined {
                    community: CommunityId(10),
                    member: MemberId(id),
                    username: None,
                };
                platform.observe(&event).await.unwrap();
                platform
                    .add_role(CommunityId(10), MemberId(id), "Unverified")
                    .await
                    .unwrap();
                platform
                    .send_text(ChannelRef::Direct { member: MemberId(id) }, "hello")
                    .await
                    .unwrap();
            }

            assert!(platform.actions().await.is_empty());
            assert_eq!(platform.community_members(CommunityId(10)).await.unwrap().len(), 198);
        }

        #[tokio::test]
        async fn test_observe_registers_joined_member_once() {
            let platform = platform();
            let joined = PlatformEvent::MemberJoined {
                community: CommunityId(10),
                member: MemberId(42),
                username: Some("newbie".to_string()),
            };

            platform.observe(&joined).await.unwrap();
            let member = platform
                .member(CommunityId(10), MemberId(42))
                .await
                .unwrap()
                .unwrap();
            assert_eq!(member.username, "newbie");
            assert!(member.roles.is_empty());

            platform
                .add_role(CommunityId(10), MemberId(42), "Unverified")
                .await
                .unwrap();
            platform.observe(&joined).await.unwrap();
            let member = platform
                .member(CommunityId(10), MemberId(42))
                .await
                .unwrap()
                .unwrap();
            assert!(member.has_role("Unverified"));

            let anonymous = PlatformEvent::MemberJoined {
                community: CommunityId(10),
                member: MemberId(43),
                username: None,
            };
            platform.observe(&anonymous).await.unwrap();
            let member = platform
                .member(CommunityId(10), MemberId(43))
                .await
                .unwrap()
                .unwrap();
            assert_eq!(member.username, "43");

            let elsewhere = PlatformEvent::MemberJoined {
                community: CommunityId(99),
                member: MemberId(44),
                username: None,
            };
            assert!(matches!(
                platform.observe(&elsewhere).await,
                Err(PlatformError::CommunityNotFound(_))
            ));
        }

        #[tokio::test]
        async fn test_send_to_unknown_channel_fails() {
            let platform = platform();
            let result = platform
                .send_text(
                    ChannelRef::Community {
                        community: CommunityId(10),
                        channel: ChannelId(999),
                    },
                    "hi",
                )
                .await;
            assert!(matches!(result, Err(PlatformError::ChannelNotFound(_))));
        }
    }
}
