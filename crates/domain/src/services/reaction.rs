//! 代词反应判定

use crate::entities::PronounTable;

/// 对一次反应事件应执行的动作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactionDecision {
    /// 授予角色
    Grant(String),
    /// 撤回这个反应本身
    Retract,
    /// 移除角色
    Revoke(String),
    /// 不做任何事
    Ignore,
}

/// 添加反应：可识别的符号授予对应角色，否则撤回该反应
pub fn decide_reaction_added(table: &PronounTable, symbol: &str) -> ReactionDecision {
    match table.role_for(symbol) {
        Some(role) => ReactionDecision::Grant(role.to_string()),
        None => ReactionDecision::Retract,
    }
}

/// 移除反应：可识别的符号移除对应角色，否则忽略
pub fn decide_reaction_removed(table: &PronounTable, symbol: &str) -> ReactionDecision {
    match table.role_for(symbol) {
        Some(role) => ReactionDecision::Revoke(role.to_string()),
        None => ReactionDecision::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn table() -> PronounTable {
        PronounTable::new([
            ("❤️", "they/them"),
            ("💛", "he/him"),
            ("💚", "any pronouns"),
            ("🧡", "she/her"),
            ("💙", "just my name"),
            ("💜", "please ask"),
        ])
        .unwrap()
    }

    #[rstest]
    #[case("❤️", ReactionDecision::Grant("they/them".into()))]
    #[case("🧡", ReactionDecision::Grant("she/her".into()))]
    #[case("💜", ReactionDecision::Grant("please ask".into()))]
    #[case("👍", ReactionDecision::Retract)]
    fn test_reaction_added(#[case] symbol: &str, #[case] expected: ReactionDecision) {
        assert_eq!(decide_reaction_added(&table(), symbol), expected);
    }

    #[rstest]
    #[case("💛", ReactionDecision::Revoke("he/him".into()))]
    #[case("👍", ReactionDecision::Ignore)]
    fn test_reaction_removed(#[case] symbol: &str, #[case] expected: ReactionDecision) {
        assert_eq!(decide_reaction_removed(&table(), symbol), expected);
    }
}
