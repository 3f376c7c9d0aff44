use image::DynamicImage;
use log::warn;

use crate::raster::thumbnail::make_thumbnail;
use crate::state::data::ImageRecord;

/// One row of the post list
#[derive(Debug, Clone)]
pub struct GalleryRow {
    pub id: i64,
    pub title: String,
    pub thumbnail: DynamicImage,
}

/// Build list rows for `records`, keeping their order.
///
/// Posts whose image no longer decodes are left out.
pub fn rows(records: &[ImageRecord], thumbnail_size: u32) -> Vec<GalleryRow> {
    records
        .iter()
        .filter_map(|record| match make_thumbnail(&record.image, thumbnail_size) {
            Some(thumbnail) => Some(GalleryRow {
                id: record.id,
                title: record.title.clone(),
                thumbnail,
            }),
            None => {
                warn!("⚠️  Skipping post {}: image does not decode", record.id);
                None
            }
        })
        .collect()
}

/// Records sorted oldest first. The store only guarantees insertion order.
pub fn chronological(records: &[ImageRecord]) -> Vec<&ImageRecord> {
    let mut sorted: Vec<&ImageRecord> = records.iter().collect();
    sorted.sort_by_key(|r| (r.created_at, r.id));
    sorted
}
