//! 验证结果定义

use serde::{Deserialize, Serialize};

/// 单次验证尝试的结果，每次尝试恰好产生一个
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationOutcome {
    /// 验证通过，携带生成的昵称
    Success(String),
    /// 成员已验证过
    AlreadyVerified,
    /// 标识不在名册中
    InvalidIdentifier,
    /// 标识属于非学生（助教、教师等）
    NonStudentRole,
    /// 标识已被其他已验证成员认领
    DuplicateClaim,
}

impl VerificationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// 用于日志的简短名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::AlreadyVerified => "already_verified",
            Self::InvalidIdentifier => "invalid_identifier",
            Self::NonStudentRole => "non_student_role",
            Self::DuplicateClaim => "duplicate_claim",
        }
    }
}
