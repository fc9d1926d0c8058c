pub mod renderer;
pub mod text;

pub use renderer::{RendererError, SnapshotLayout, SnapshotRenderer};
