mod observation;
mod region;
mod summary;

pub use observation::Observation;
pub use region::{CombinedRecord, RegionPolygon};
pub use summary::{StateSummaries, StateSummary};
