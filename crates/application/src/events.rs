//! 平台事件定义
//!
//! 每种事件对应一个处理器，由 `EventDispatcher` 分发。

use domain::{ChannelId, CommunityId, MemberId, MessageId};
use serde::{Deserialize, Serialize};

use crate::platform::ChannelRef;

/// 消息所在频道类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChannelKind {
    Direct,
    Community {
        community: CommunityId,
        channel: ChannelId,
    },
}

/// 反应添加/移除事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionEvent {
    pub community: CommunityId,
    pub channel: ChannelId,
    pub message: MessageId,
    pub emoji: String,
    pub member: MemberId,
}

impl ReactionEvent {
    pub fn channel_ref(&self) -> ChannelRef {
        ChannelRef::Community {
            community: self.community,
            channel: self.channel,
        }
    }
}

/// 管理命令调用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInvocation {
    pub community: CommunityId,
    pub channel: ChannelId,
    pub requester: MemberId,
    pub name: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandInvocation {
    pub fn channel_ref(&self) -> ChannelRef {
        ChannelRef::Community {
            community: self.community,
            channel: self.channel,
        }
    }
}

/// 平台投递的入站事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlatformEvent {
    MemberJoined {
        community: CommunityId,
        member: MemberId,
        /// 新成员的用户名，进程内平台据此登记成员
        #[serde(default)]
        username: Option<String>,
    },
    MessageReceived {
        author: MemberId,
        text: String,
        channel: ChannelKind,
    },
    ReactionAdded(ReactionEvent),
    ReactionRemoved(ReactionEvent),
    CommandInvoked(CommandInvocation),
}

impl PlatformEvent {
    /// 用于日志的事件类型名
    pub fn kind(&self) -> &'static str {
        match self {
            PlatformEvent::MemberJoined { .. } => "member_joined",
            PlatformEvent::MessageReceived { .. } => "message_received",
            PlatformEvent::ReactionAdded(_) => "reaction_added",
            PlatformEvent::ReactionRemoved(_) => "reaction_removed",
            PlatformEvent::CommandInvoked(_) => "command_invoked",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let line = r#"{"type":"message_received","author":7,"text":"AB3EF","channel":{"kind":"direct"}}"#;
        let event: PlatformEvent = serde_json::from_str(line).unwrap();
        assert_eq!(
            event,
            PlatformEvent::MessageReceived {
                author: MemberId(7),
                text: "AB3EF".to_string(),
                channel: ChannelKind::Direct,
            }
        );

        let line = r#"{"type":"reaction_added","community":1,"channel":2,"message":3,"emoji":"💛","member":4}"#;
        let event: PlatformEvent = serde_json::from_str(line).unwrap();
        assert_eq!(event.kind(), "reaction_added");

        let line = r#"{"type":"command_invoked","community":1,"channel":2,"requester":4,"name":"ping"}"#;
        let event: PlatformEvent = serde_json::from_str(line).unwrap();
        assert!(matches!(event, PlatformEvent::CommandInvoked(ref c) if c.args.is_empty()));
    }
}
