use std::fmt;

use crate::state::data::{Coordinate, ImageRecord};

/// Timestamp format used in pin subtitles
const SUBTITLE_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// A map annotation for one post
#[derive(Debug, Clone, PartialEq)]
pub struct MapPin {
    pub id: i64,
    pub coordinate: Coordinate,
    pub title: String,
    /// When the photo was posted
    pub subtitle: String,
}

impl fmt::Display for MapPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "📍 {:>10.5}, {:>10.5}  {}  ({})",
            self.coordinate.latitude, self.coordinate.longitude, self.title, self.subtitle
        )
    }
}

/// One pin per record, in the order given
pub fn pins<'a>(records: impl IntoIterator<Item = &'a ImageRecord>) -> Vec<MapPin> {
    records
        .into_iter()
        .map(|record| MapPin {
            id: record.id,
            coordinate: record.coordinate(),
            title: record.title.clone(),
            subtitle: record.created_at.format(SUBTITLE_FORMAT).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_one_pin_per_record() {
        let records = vec![
            ImageRecord {
                id: 7,
                image: Vec::new(),
                title: "Sunset".into(),
                latitude: 36.6,
                longitude: -121.9,
                created_at: Utc.with_ymd_and_hms(2020, 7, 9, 18, 30, 0).unwrap(),
            },
            ImageRecord {
                id: 8,
                image: Vec::new(),
                title: "Pier".into(),
                latitude: 36.61,
                longitude: -121.89,
                created_at: Utc.with_ymd_and_hms(2020, 7, 10, 8, 0, 5).unwrap(),
            },
        ];

        let pins = pins(&records);
        assert_eq!(pins.len(), 2);
        assert_eq!(pins[0].coordinate, Coordinate::new(36.6, -121.9));
        assert_eq!(pins[0].title, "Sunset");
        assert_eq!(pins[0].subtitle, "2020-07-09 18:30:00 UTC");
        assert_eq!(pins[1].id, 8);
        assert!(pins[1].to_string().contains("Pier"));
    }
}
