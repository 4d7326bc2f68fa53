//! Name tag sheets for events: one label per attendee with their name and a
//! QR code linking to their profile, tiled onto A4 pages and written as PDF.

pub mod config;
pub mod document;
pub mod error;
pub mod label;
pub mod page;
pub mod qr;
pub mod roster;

pub use config::{Geometry, NameTagConfig};
pub use document::{generate_name_tags, GenerationSummary};
pub use error::AppError;
