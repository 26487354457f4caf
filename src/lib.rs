//! Read-along highlighting and a drag-and-drop vocabulary quiz built from the
//! same passage.

pub mod config;
pub mod error;
pub mod lesson;
pub mod passage;
pub mod quiz;
pub mod reader;
pub mod session;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use config::LessonConfig;
pub use error::LessonError;
pub use lesson::{quiz_json, serialize_lesson, Lesson};
pub use passage::{Passage, WordToken};
pub use session::Session;
