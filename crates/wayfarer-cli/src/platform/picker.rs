use std::path::{Path, PathBuf};

use wayfarer_core::capture::{
    CaptureOptions, CaptureResult, CaptureSource, ImagePicker, Permission,
};
use wayfarer_core::{Error, Result};

/// Picks an image file given on the command line.
///
/// Only the gallery source is available; there is no camera to drive from a
/// terminal. Without a path the pick counts as canceled.
#[derive(Debug, Clone, Default)]
pub struct FileImagePicker {
    path: Option<PathBuf>,
}

impl FileImagePicker {
    pub const fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl ImagePicker for FileImagePicker {
    async fn launch(
        &self,
        source: CaptureSource,
        options: &CaptureOptions,
    ) -> Result<CaptureResult> {
        if source == CaptureSource::Camera {
            return Err(Error::PermissionDenied(Permission::Camera));
        }

        let Some(path) = self.path.as_deref() else {
            return Ok(CaptureResult::canceled());
        };

        tracing::debug!(
            "Picking {} (quality {:.2}, editing {})",
            path.display(),
            options.quality,
            options.allows_editing
        );
        let uri = image_uri(path)?;
        Ok(CaptureResult::picked(uri))
    }
}

/// Validate that `path` is a readable image and return its `file://` URI
fn image_uri(path: &Path) -> Result<String> {
    let canonical = path
        .canonicalize()
        .map_err(|error| Error::Capture(format!("{}: {error}", path.display())))?;

    let (width, height) = image::image_dimensions(&canonical).map_err(|error| {
        Error::Capture(format!("{} is not a readable image: {error}", path.display()))
    })?;
    tracing::debug!("Image is {width}x{height}");

    url::Url::from_file_path(&canonical)
        .map(String::from)
        .map_err(|()| Error::Capture(format!("{} has no file URI", canonical.display())))
}
