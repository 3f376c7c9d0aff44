//! Image Post Filters
//!
//! Pick a photo, run it through a live color/blur/bloom filter chain, stamp
//! it with a title and position, and keep the result in a local catalog.
//!
//! - `filter` - the pure three-stage pipeline
//! - `state` - records, the SQLite catalog and the editor controller
//! - `services` - location, photo library and picker seams
//! - `ui` - list and map views over stored posts

pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod filter;
pub mod raster;
pub mod services;
pub mod state;
pub mod ui;
