//! 领域模型错误定义
//!
//! 领域层只在构造值对象或配置表时可能失败，验证结果本身不是错误。

use thiserror::Error;

/// 领域模型错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// 参数不合法
    #[error("参数不合法: {field}: {reason}")]
    InvalidArgument { field: String, reason: String },

    /// 配置表中出现重复项
    #[error("重复的{field}: {value}")]
    Duplicate { field: String, value: String },
}

impl DomainError {
    /// 创建参数错误
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// 创建重复项错误
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// 领域模型结果类型
pub type DomainResult<T> = Result<T, DomainError>;
