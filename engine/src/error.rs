use std::io;

use sudoplot_config::ConfigError;
use sudoplot_device::SessionError;
use sudoplot_layout::LayoutError;
use sudoplot_resources::ResourceError;
use thiserror::Error;

use crate::select::SelectionError;

/// Any failure of a plot run. Every variant maps to a distinct non-zero
/// process exit code.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("failed to open serial port {port}: {source}")]
    Open { port: String, source: io::Error },
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("failed to write instructions: {0}")]
    Output(#[source] io::Error),
}

impl RunError {
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Selection(_) => 2,
            Self::Resource(_) => 3,
            Self::Layout(_) => 4,
            Self::Session(SessionError::Timeout { .. }) => 5,
            Self::Open { .. }
            | Self::Session(SessionError::Cycle(_) | SessionError::Transport { .. }) => 6,
            Self::Session(SessionError::InvalidTransition(_)) | Self::Output(_) => 1,
        }
    }
}
