//! 应用层服务

pub mod admin_service;
pub mod pronoun_service;
pub mod verification_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use admin_service::{AdminCommandService, AdminCommandServiceDependencies};
pub use pronoun_service::PronounService;
pub use verification_service::{
    AttemptReport, VerificationService, VerificationServiceDependencies,
};

/// 社区中约定的角色名称
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleNames {
    pub unverified: String,
    pub admin: String,
    pub staff: String,
}

impl Default for RoleNames {
    fn default() -> Self {
        Self {
            unverified: "Unverified".to_string(),
            admin: "Admin".to_string(),
            staff: "Staff".to_string(),
        }
    }
}
