//! 领域服务
//!
//! 纯函数形式的业务逻辑，不依赖平台与存储。

pub mod duplicate_guard;
pub mod nickname;
pub mod reaction;
pub mod roster_audit;
pub mod verification;

pub use duplicate_guard::find_claim;
pub use nickname::{derive_nickname, fits_label_bound, MAX_LABEL_CHARS};
pub use reaction::{decide_reaction_added, decide_reaction_removed, ReactionDecision};
pub use roster_audit::unmatched_students;
pub use verification::resolve;
