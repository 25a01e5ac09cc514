/// One row of raw drought input.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub state: String,
    pub drought_percentage: f64, // Expected in [0, 100], not enforced
    pub crop_type: String,
}

impl Observation {
    pub fn new(state: impl Into<String>, drought_percentage: f64, crop_type: impl Into<String>) -> Self {
        Self { state: state.into(), drought_percentage, crop_type: crop_type.into() }
    }
}
