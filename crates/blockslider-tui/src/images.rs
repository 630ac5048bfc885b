use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tracing::debug;

/// Result of a background image decode
pub enum ImageLoadResult {
    Success {
        path: PathBuf,
        width: u32,
        height: u32,
    },
    Failure {
        path: PathBuf,
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageState {
    Loading,
    Loaded { width: u32, height: u32 },
    Failed(String),
}

impl ImageLoadResult {
    pub fn into_state(self) -> (PathBuf, ImageState) {
        match self {
            ImageLoadResult::Success {
                path,
                width,
                height,
            } => (path, ImageState::Loaded { width, height }),
            ImageLoadResult::Failure { path, error } => (path, ImageState::Failed(error)),
        }
    }
}

/// Decode `path` on the blocking pool and report back on `tx`
pub fn spawn_image_load(path: PathBuf, tx: mpsc::UnboundedSender<ImageLoadResult>) {
    tokio::task::spawn_blocking(move || {
        let result = match image::open(&path) {
            Ok(img) => {
                debug!(path = %path.display(), "Image decoded");
                ImageLoadResult::Success {
                    width: img.width(),
                    height: img.height(),
                    path,
                }
            }
            Err(e) => ImageLoadResult::Failure {
                error: e.to_string(),
                path,
            },
        };
        let _ = tx.send(result);
    });
}

/// Placeholder text shown where the image sits in a block
pub fn caption(path: &Path, state: &ImageState) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    match state {
        ImageState::Loading => format!("[image {} loading]", name),
        ImageState::Loaded { width, height } => format!("[image {} {}x{}]", name, width, height),
        ImageState::Failed(_) => format!("[image {} unavailable]", name),
    }
}
