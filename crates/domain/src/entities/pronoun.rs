//! 代词角色映射表
//!
//! 反应符号到社区角色名的固定映射，启动时构建一次并校验。

use std::collections::HashSet;

use crate::errors::{DomainError, DomainResult};

const VARIATION_SELECTOR: char = '\u{FE0F}';

/// 去掉 emoji 变体选择符，使 "❤️" 与 "❤" 视为同一符号
fn canonical_symbol(symbol: &str) -> String {
    symbol
        .trim()
        .chars()
        .filter(|c| *c != VARIATION_SELECTOR)
        .collect()
}

/// 代词映射表，进程内不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PronounTable {
    mappings: Vec<(String, String)>,
}

impl PronounTable {
    /// 构建并校验映射表：符号与角色名都不能为空或重复
    pub fn new<I, S, R>(mappings: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = (S, R)>,
        S: Into<String>,
        R: Into<String>,
    {
        let mut seen_symbols = HashSet::new();
        let mut seen_roles = HashSet::new();
        let mut table = Vec::new();

        for (symbol, role) in mappings {
            let symbol: String = symbol.into();
            let role: String = role.into();

            if canonical_symbol(&symbol).is_empty() {
                return Err(DomainError::invalid_argument("emoji", "cannot be empty"));
            }
            if role.trim().is_empty() {
                return Err(DomainError::invalid_argument("role", "cannot be empty"));
            }
            if !seen_symbols.insert(canonical_symbol(&symbol)) {
                return Err(DomainError::duplicate("emoji", symbol));
            }
            if !seen_roles.insert(role.clone()) {
                return Err(DomainError::duplicate("role", role));
            }
            table.push((symbol, role));
        }

        if table.is_empty() {
            return Err(DomainError::invalid_argument(
                "pronouns",
                "at least one mapping is required",
            ));
        }

        Ok(Self { mappings: table })
    }

    /// 查找符号对应的角色名
    pub fn role_for(&self, symbol: &str) -> Option<&str> {
        let wanted = canonical_symbol(symbol);
        self.mappings
            .iter()
            .find(|(candidate, _)| canonical_symbol(candidate) == wanted)
            .map(|(_, role)| role.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PronounTable {
        PronounTable::new([("❤️", "they/them"), ("💛", "he/him")]).unwrap()
    }

    #[test]
    fn test_lookup_ignores_variation_selector() {
        let table = sample();
        assert_eq!(table.role_for("❤️"), Some("they/them"));
        assert_eq!(table.role_for("❤"), Some("they/them"));
        assert_eq!(table.role_for("💛"), Some("he/him"));
        assert_eq!(table.role_for("👍"), None);
    }

    #[test]
    fn test_rejects_duplicates_and_blanks() {
        assert!(matches!(
            PronounTable::new([("❤️", "a"), ("❤", "b")]),
            Err(DomainError::Duplicate { .. })
        ));
        assert!(matches!(
            PronounTable::new([("❤️", "a"), ("💛", "a")]),
            Err(DomainError::Duplicate { .. })
        ));
        assert!(PronounTable::new([(" ", "a")]).is_err());
        assert!(PronounTable::new([("❤️", " ")]).is_err());
        assert!(PronounTable::new(Vec::<(String, String)>::new()).is_err());
    }
}
