//! 领域实体定义

pub mod course;
pub mod member;
pub mod outcome;
pub mod pronoun;
pub mod roster;

pub use course::*;
pub use member::*;
pub use outcome::*;
pub use pronoun::*;
pub use roster::*;
