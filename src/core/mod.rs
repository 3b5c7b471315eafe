pub mod grading;
pub mod payload;

pub use crate::domain::ports::{CommentingManager, GradingManager, ServiceRuntime};
pub use crate::utils::error::Result;
pub use payload::Payload;
