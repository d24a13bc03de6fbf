use crate::event::TouchId;
use crate::target::TargetId;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("touch {touch} is not being tracked")]
    UnknownTouch { touch: TouchId },
    #[error("touch {touch} is already owned by {owner}")]
    AlreadyOwned { touch: TouchId, owner: TargetId },
    #[error("{target} is not a candidate for touch {touch}")]
    NotACandidate { touch: TouchId, target: TargetId },
}
