//! 名册核对：找出尚未被任何已验证成员认领的学生标识

use crate::entities::{Member, Roster};
use crate::value_objects::ComputingId;

/// 返回名册中学生身份、但没有匹配到已验证成员的标识，按升序排列。
///
/// 持有 `staff_tag` 的成员不参与匹配。
pub fn unmatched_students(
    roster: &Roster,
    members: &[Member],
    unverified_tag: &str,
    staff_tag: &str,
) -> Vec<ComputingId> {
    let verified: Vec<String> = members
        .iter()
        .filter(|member| member.is_verified(unverified_tag) && !member.has_role(staff_tag))
        .map(|member| member.effective_label().to_lowercase())
        .collect();

    let mut unmatched: Vec<ComputingId> = roster
        .entries()
        .filter(|entry| entry.is_student())
        .filter(|entry| {
            !verified
                .iter()
                .any(|label| label.contains(entry.identifier.as_str()))
        })
        .map(|entry| entry.identifier.clone())
        .collect();

    unmatched.sort();
    unmatched
}
