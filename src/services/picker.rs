/// Image picker results
use image::DynamicImage;
use log::debug;
use std::path::Path;

use crate::error::PickError;

/// What came back from the picker.
///
/// A picker that supports cropping may return both the edited and the
/// original image; the edited one wins.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub edited: Option<DynamicImage>,
    pub original: Option<DynamicImage>,
}

impl Selection {
    pub fn original(image: DynamicImage) -> Self {
        Self {
            edited: None,
            original: Some(image),
        }
    }

    /// The user dismissed the picker
    pub fn cancelled() -> Self {
        Self::default()
    }

    /// The image the editor should use, or None if the pick was cancelled
    pub fn into_image(self) -> Option<DynamicImage> {
        self.edited.or(self.original)
    }
}

/// Pick an image straight from a file on disk
pub fn pick_from_path(path: impl AsRef<Path>) -> Result<Selection, PickError> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| PickError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Picked {} ({}x{})", path.display(), image.width(), image.height());
    Ok(Selection::original(image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    #[test]
    fn test_edited_image_wins() {
        let selection = Selection {
            edited: Some(DynamicImage::new_rgb8(1, 1)),
            original: Some(DynamicImage::new_rgb8(4, 4)),
        };
        assert_eq!(selection.into_image().unwrap().dimensions(), (1, 1));
    }

    #[test]
    fn test_cancelled_has_no_image() {
        assert!(Selection::cancelled().into_image().is_none());
    }

    #[test]
    fn test_pick_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pick.png");
        DynamicImage::new_rgb8(3, 5).save(&path).unwrap();

        let picked = pick_from_path(&path).unwrap().into_image().unwrap();
        assert_eq!(picked.dimensions(), (3, 5));

        assert!(pick_from_path(dir.path().join("missing.png")).is_err());
    }
}
