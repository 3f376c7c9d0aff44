/// Location updates
///
/// The platform pushes coordinates into a `LocationFeed`; the editor holds a
/// receiver and only ever reads the most recent value.
use log::trace;
use tokio::sync::watch;

use crate::state::data::Coordinate;

/// Receiving end of the location stream
pub type LocationReceiver = watch::Receiver<Option<Coordinate>>;

/// Sending end of the location stream
#[derive(Debug)]
pub struct LocationFeed {
    tx: watch::Sender<Option<Coordinate>>,
}

impl LocationFeed {
    /// A feed that has not reported a position yet
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// A feed that starts at a known position
    pub fn starting_at(at: Coordinate) -> Self {
        let (tx, _rx) = watch::channel(Some(at));
        Self { tx }
    }

    /// Publish a new position, replacing the previous one
    pub fn update(&self, at: Coordinate) {
        trace!("📍 Location update {:.5}, {:.5}", at.latitude, at.longitude);
        self.tx.send_replace(Some(at));
    }

    pub fn subscribe(&self) -> LocationReceiver {
        self.tx.subscribe()
    }
}

impl Default for LocationFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Where the editor takes its coordinates from
#[derive(Debug, Clone)]
pub enum LocationBinding {
    /// Editing an existing post: keep its coordinates, ignore live updates
    Fixed(Coordinate),
    /// New post: latest reported position
    Live(LocationReceiver),
    /// No location service available
    Unavailable,
}

impl LocationBinding {
    /// Coordinate to stamp on a post committed now.
    ///
    /// Falls back to (0, 0) when nothing has been reported.
    pub fn current(&self) -> Coordinate {
        match self {
            LocationBinding::Fixed(at) => *at,
            LocationBinding::Live(rx) => {
                let latest = *rx.borrow();
                latest.unwrap_or_default()
            }
            LocationBinding::Unavailable => Coordinate::default(),
        }
    }
}
