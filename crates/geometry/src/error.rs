#![forbid(unsafe_code)]

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("frame exceeds vertex capacity of {capacity}")]
    CapacityExceeded { capacity: usize },
}
