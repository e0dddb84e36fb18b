//! 验证判定
//!
//! `resolve` 只读，不修改任何状态。调用方仅在 `Success` 时清除 Unverified
//! 角色并设置昵称。

use crate::entities::{Member, Roster, VerificationOutcome};
use crate::services::{derive_nickname, find_claim};
use crate::value_objects::ComputingId;

/// 对一次验证尝试做出判定。
///
/// 判定顺序：已验证 → 名册中不存在 → 非学生 → 已被认领 → 成功。
pub fn resolve(
    identifier: &str,
    roster: &Roster,
    member: &Member,
    all_members: &[Member],
    unverified_tag: &str,
) -> VerificationOutcome {
    let identifier = ComputingId::normalize(identifier);

    if member.is_verified(unverified_tag) {
        return VerificationOutcome::AlreadyVerified;
    }

    let Some(entry) = roster.get(&identifier) else {
        return VerificationOutcome::InvalidIdentifier;
    };

    if !entry.is_student() {
        return VerificationOutcome::NonStudentRole;
    }

    if find_claim(&identifier, all_members, unverified_tag) {
        return VerificationOutcome::DuplicateClaim;
    }

    VerificationOutcome::Success(derive_nickname(&entry.full_name, &identifier))
}
