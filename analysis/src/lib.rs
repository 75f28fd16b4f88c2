pub mod coords;
pub mod error;
pub mod events;
pub mod frames;
pub mod heatmap;
pub mod keyevents;
pub mod model;
pub mod overview;
pub mod rollup;
pub mod roster;
pub mod summary;
pub mod timeline;

pub use error::AnalysisError;
