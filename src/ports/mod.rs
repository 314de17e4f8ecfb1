//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and an
//! external system. Implementations live in `src/adapters/`.

pub mod image_editor;

pub use image_editor::{EditRequest, EditResult, ImageBlob, ImageEditor};
