//! Origami fold cipher engine
//!
//! Lays a message into a letter grid and folds it: paired rows or columns
//! are summed letter by letter into one side while the other side is
//! retired. The visible letters left after a fold sequence form the output.
//!
//! - [`domain`] pure engine: grid building, folding, replay, extraction
//! - [`config`] validated settings
//! - [`app`] editable session for a presentation layer
//! - [`ui`] text and raster snapshot rendering

pub mod app;
pub mod config;
pub mod domain;
pub mod ui;
