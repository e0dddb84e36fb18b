//! 重复认领检测

use crate::entities::Member;
use crate::value_objects::ComputingId;

/// 检查标识是否已被某个已验证成员认领。
///
/// 只扫描不持有 `unverified_tag` 的成员，判断其昵称（无昵称时为用户名）
/// 是否包含该标识（不区分大小写）。结果只关心是否存在，与遍历顺序无关。
pub fn find_claim(identifier: &ComputingId, members: &[Member], unverified_tag: &str) -> bool {
    members
        .iter()
        .filter(|member| member.is_verified(unverified_tag))
        .any(|member| {
            member
                .effective_label()
                .to_lowercase()
                .contains(identifier.as_str())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::MemberId;

    const UNVERIFIED: &str = "Unverified";

    fn id(raw: &str) -> ComputingId {
        ComputingId::normalize(raw)
    }

    #[test]
    fn test_detects_label_of_verified_member() {
        let members = vec![
            Member::new(MemberId(1), "jane").with_label("Jane Doe (AB3EF)"),
            Member::new(MemberId(2), "bob").with_role(UNVERIFIED),
        ];
        assert!(find_claim(&id("ab3ef"), &members, UNVERIFIED));
        assert!(!find_claim(&id("zz9"), &members, UNVERIFIED));
    }

    #[test]
    fn test_ignores_unverified_members() {
        let members = vec![Member::new(MemberId(1), "jane")
            .with_label("Jane Doe (ab3ef)")
            .with_role(UNVERIFIED)];
        assert!(!find_claim(&id("ab3ef"), &members, UNVERIFIED));
    }

    #[test]
    fn test_falls_back_to_username_without_label() {
        let members = vec![Member::new(MemberId(1), "ab3ef_gaming")];
        assert!(find_claim(&id("ab3ef"), &members, UNVERIFIED));
    }

    #[test]
    fn test_result_is_order_independent() {
        let mut members = vec![
            Member::new(MemberId(1), "a").with_label("Someone (xy1)"),
            Member::new(MemberId(2), "b").with_label("Other (ab3ef)"),
            Member::new(MemberId(3), "c").with_role(UNVERIFIED),
        ];
        let forward = find_claim(&id("ab3ef"), &members, UNVERIFIED);
        members.reverse();
        assert_eq!(forward, find_claim(&id("ab3ef"), &members, UNVERIFIED));
    }
}
