//! 管理命令解析

use domain::{MemberId, MessageId};

use crate::error::ApplicationError;

/// 管理员可用的命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    Ping,
    /// 在当前频道回显文本
    Say(String),
    /// 给当前频道的某条消息添加反应
    React {
        message: MessageId,
        emojis: Vec<String>,
    },
    /// 列出尚未验证的学生
    GetUnverified,
    /// 将成员恢复为未验证状态，释放其标识
    Reset(MemberId),
}

impl AdminCommand {
    pub fn parse(name: &str, args: &[String]) -> Result<Self, ApplicationError> {
        match name {
            "ping" => Ok(AdminCommand::Ping),
            "say" => {
                let text = args.join(" ");
                if text.trim().is_empty() {
                    return Err(ApplicationError::invalid_command("say requires text"));
                }
                Ok(AdminCommand::Say(text))
            }
            "react" => {
                let (message, emojis) = args
                    .split_first()
                    .ok_or_else(|| ApplicationError::invalid_command("react requires a message id"))?;
                Ok(AdminCommand::React {
                    message: message.parse()?,
                    emojis: emojis.to_vec(),
                })
            }
            "get_unverified" => Ok(AdminCommand::GetUnverified),
            "reset" => {
                let member = args
                    .first()
                    .ok_or_else(|| ApplicationError::invalid_command("reset requires a member id"))?;
                Ok(AdminCommand::Reset(member.parse()?))
            }
            other => Err(ApplicationError::invalid_command(format!(
                "unknown command `{other}`"
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AdminCommand::Ping => "ping",
            AdminCommand::Say(_) => "say",
            AdminCommand::React { .. } => "react",
            AdminCommand::GetUnverified => "get_unverified",
            AdminCommand::Reset(_) => "reset",
        }
    }
}
