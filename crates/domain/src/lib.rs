//! 学生身份验证系统核心领域模型
//!
//! 包含课程、名册、社区成员等核心实体，以及验证判定、昵称生成、
//! 重复认领检测等纯业务逻辑。本 crate 不做任何 I/O。

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;

// 重新导出常用类型
pub use entities::*;
pub use errors::*;
pub use services::*;
pub use value_objects::*;
