//! Application state modules
//!
//! State structs own their fields and task handles. Results flow back to
//! `QrToolApp` as [`StateEvent`]s instead of direct mutation.

mod generator;
mod ui;

use std::path::PathBuf;

pub use generator::{GenerateError, GeneratorState, MAX_INPUT_CHARS};
pub use ui::{Tab, UiState};

/// Events produced by state operations
#[derive(Debug)]
pub enum StateEvent {
    /// An encode call was started
    Generating { chars: usize },

    /// An encode call finished with a new image
    Generated { modules: usize, bytes: usize },

    /// An encode call failed; details are already logged
    GenerationFailed,

    /// The current image was written to disk
    Saved(PathBuf),

    /// Writing the image failed
    SaveFailed(String),
}
