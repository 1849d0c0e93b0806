pub mod dataset;
pub mod domain;
pub mod error;

pub use dataset::{Dataset, LoadReport, SkippedRecord};
pub use domain::{Category, LatLng, LatLngBounds, Project, ProjectId, ProjectRecord, RawCoordinate, Status};
pub use error::{DatasetError, SkipReason};
