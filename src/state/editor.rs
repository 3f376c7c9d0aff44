/// Editor controller
///
/// Owns the picked photo, the current slider values and the latest preview
/// frame. Every slider change re-renders the preview synchronously; commit
/// renders at full resolution, stores a post and hands back an export
/// request for the photo library.
///
/// States:
/// - Empty: nothing picked yet
/// - Loaded: original + preview-sized copy + latest frame
use image::{DynamicImage, GenericImageView};
use log::{debug, info};
use std::sync::Arc;

use super::data::{Coordinate, ImageRecord, NewImageRecord};
use super::edit::{FilterParams, Parameter};
use super::library::RecordStore;
use crate::error::EditorError;
use crate::filter;
use crate::raster::{self, preview::{scale_to_preview, PreviewSize}};
use crate::services::location::LocationBinding;
use crate::services::photos::{ExportRequest, PhotoLibrary};
use crate::services::picker::Selection;

/// Result of a successful commit
#[derive(Debug)]
pub struct Committed {
    /// The stored post
    pub record: ImageRecord,
    /// Export of the full resolution frame, not started yet
    pub export: ExportRequest,
}

#[derive(Debug)]
struct Session {
    /// Full resolution photo, used at commit
    original: DynamicImage,
    /// Preview-sized copy, used on every slider change
    preview_source: DynamicImage,
    /// Latest rendered preview
    frame: DynamicImage,
}

pub struct Editor<'a, S: RecordStore> {
    store: &'a S,
    photos: Arc<dyn PhotoLibrary>,
    location: LocationBinding,
    preview_size: PreviewSize,
    params: FilterParams,
    title: String,
    /// `None` while Empty
    session: Option<Session>,
}

impl<'a, S: RecordStore> Editor<'a, S> {
    /// Editor for a new post
    pub fn new(
        store: &'a S,
        photos: Arc<dyn PhotoLibrary>,
        location: LocationBinding,
        preview_size: PreviewSize,
    ) -> Self {
        Self {
            store,
            photos,
            location,
            preview_size,
            params: FilterParams::default(),
            title: String::new(),
            session: None,
        }
    }

    /// Editor preloaded from an existing post.
    ///
    /// The post's coordinates are kept for the new commit; live location
    /// updates are not consulted.
    pub fn for_record(
        store: &'a S,
        photos: Arc<dyn PhotoLibrary>,
        record: &ImageRecord,
        preview_size: PreviewSize,
    ) -> Result<Self, EditorError> {
        let image = raster::decode(&record.image).map_err(EditorError::Decode)?;
        let location = LocationBinding::Fixed(record.coordinate());

        let mut editor = Self::new(store, photos, location, preview_size);
        editor.title = record.title.clone();
        editor.set_source_image(image);
        Ok(editor)
    }

    /// Replace the photo being edited and render a fresh preview.
    ///
    /// Slider values carry over from the previous photo.
    pub fn set_source_image(&mut self, image: DynamicImage) -> &DynamicImage {
        let preview_source = scale_to_preview(&image, self.preview_size);
        let frame = filter::render(&preview_source, &self.params);
        let (w, h) = image.dimensions();
        debug!("Loaded {}x{} source", w, h);

        let session = self.session.insert(Session {
            original: image,
            preview_source,
            frame,
        });
        &session.frame
    }

    /// Take the result of the image picker. Cancellation changes nothing.
    pub fn apply_selection(&mut self, selection: Selection) -> Option<&DynamicImage> {
        let image = selection.into_image()?;
        Some(self.set_source_image(image))
    }

    /// A slider moved: update that one value and re-render the preview
    pub fn on_parameter_changed(
        &mut self,
        param: Parameter,
        value: f32,
    ) -> Result<&DynamicImage, EditorError> {
        let session = self.session.as_mut().ok_or(EditorError::NoSourceImage)?;

        self.params.set(param, value);
        session.frame = filter::render(&session.preview_source, &self.params);
        Ok(&session.frame)
    }

    /// Load a full set of slider values at once, re-rendering if a photo is loaded
    pub fn apply_params(&mut self, params: FilterParams) -> Option<&DynamicImage> {
        self.params = params;
        let session = self.session.as_mut()?;
        session.frame = filter::render(&session.preview_source, &self.params);
        Some(&session.frame)
    }

    /// Render at full resolution, store the post and prepare its export.
    ///
    /// Nothing is stored and no export is prepared unless every step up to
    /// and including the store append succeeds.
    pub fn commit(&mut self, title: &str) -> Result<Committed, EditorError> {
        let session = self.session.as_ref().ok_or(EditorError::NoSourceImage)?;

        let title = title.trim();
        if title.is_empty() {
            return Err(EditorError::MissingTitle);
        }

        let rendered = filter::try_render(&session.original, &self.params)?;
        let encoded = raster::encode_png(&rendered).map_err(EditorError::Encode)?;
        let at = self.location.current();

        let record = self
            .store
            .append(NewImageRecord::now(encoded, title, at))?;
        info!(
            "✅ Posted \"{}\" ({}x{}) as #{}",
            record.title,
            rendered.width(),
            rendered.height(),
            record.id
        );

        self.title = record.title.clone();
        let export = ExportRequest::new(Arc::clone(&self.photos), Arc::new(rendered));
        Ok(Committed { record, export })
    }

    /// Latest preview frame, if a photo is loaded
    pub fn frame(&self) -> Option<&DynamicImage> {
        self.session.as_ref().map(|session| &session.frame)
    }

    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    /// Title of the post being edited (prefilled when editing an existing post)
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Coordinate a commit right now would be stamped with
    pub fn location(&self) -> Coordinate {
        self.location.current()
    }
}
