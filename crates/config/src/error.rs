#![forbid(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("failed to serialize TOML: {0}")]
    TomlSer(#[from] toml_edit::ser::Error),

    #[error("config file not found: {0}")]
    InvalidPath(PathBuf),

    #[error("recv_frame_len {0} is below the minimum of {min}", min = crate::MIN_RECV_FRAME_LEN)]
    FrameTooSmall(usize),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}
