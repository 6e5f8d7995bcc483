use thiserror::Error;

use crate::physics::BodyId;

#[derive(Debug, Error, PartialEq)]
pub enum BodyError {
    #[error("{0} is not known to the physics backend")]
    UnknownBody(BodyId),

    #[error("{0} is already registered with this controller")]
    DuplicateSegment(BodyId),

    #[error("body layout has no segments")]
    EmptyLayout,

    #[error("invalid root index {root} (layout has {len} segments)")]
    InvalidRoot { root: usize, len: usize },

    #[error("segment {segment} has parent {parent}, which is not an earlier segment")]
    InvalidParent { segment: usize, parent: usize },

    #[error("segment {0} has no parent but is not the root")]
    DetachedSegment(usize),

    #[error("segment {segment} has non-positive contact radius {radius}")]
    InvalidRadius { segment: usize, radius: f32 },
}
