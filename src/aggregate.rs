//! Group observations by state into one summary row per state.
//!
//! The dominant crop is the mode of the state's crop types. Ties go to the
//! crop whose first occurrence comes earliest in the input, never to
//! alphabetical or hash order.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    error::{DroughtError, DroughtResult},
    types::{Observation, StateSummaries, StateSummary},
};

/// Running totals for a single state.
#[derive(Debug, Default)]
struct Accumulator<'a> {
    sum: f64,
    count: usize,
    crops: Vec<(&'a str, usize)>, // (crop, count) in first-appearance order
}

impl<'a> Accumulator<'a> {
    fn push(&mut self, observation: &'a Observation) {
        self.sum += observation.drought_percentage;
        self.count += 1;
        match self.crops.iter_mut().find(|(crop, _)| *crop == observation.crop_type) {
            Some((_, count)) => *count += 1,
            None => self.crops.push((observation.crop_type.as_str(), 1)),
        }
    }

    fn mean(&self) -> f64 { self.sum / self.count as f64 }

    /// Highest count wins; only a strictly greater count displaces an earlier crop.
    fn mode(&self) -> &'a str {
        let mut best: Option<(&'a str, usize)> = None;
        for &(crop, count) in &self.crops {
            if best.is_none_or(|(_, top)| count > top) {
                best = Some((crop, count));
            }
        }
        best.map(|(crop, _)| crop).unwrap_or_default()
    }
}

/// Check a single observation. `record` is 1-based.
fn validate(record: usize, observation: &Observation) -> DroughtResult<()> {
    if observation.state.trim().is_empty() {
        return Err(DroughtError::data_format(record, "State", "state is empty"));
    }
    if observation.crop_type.trim().is_empty() {
        return Err(DroughtError::data_format(record, "Crop_Type", "crop type is empty"));
    }
    if !observation.drought_percentage.is_finite() {
        return Err(DroughtError::data_format(
            record,
            "Drought_Percentage",
            format!("{} is not a finite number", observation.drought_percentage),
        ));
    }
    Ok(())
}

/// Aggregate observations into one [`StateSummary`] per distinct state.
///
/// Any invalid observation rejects the whole input.
pub fn aggregate(observations: &[Observation]) -> DroughtResult<StateSummaries> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Accumulator> = HashMap::new();

    for (i, observation) in observations.iter().enumerate() {
        validate(i + 1, observation)?;
        let state = observation.state.as_str();
        groups.entry(state)
            .or_insert_with(|| { order.push(state); Accumulator::default() })
            .push(observation);
    }

    let summaries = order.into_iter()
        .map(|state| {
            let acc = &groups[state];
            StateSummary {
                state: state.to_string(),
                mean_drought_percentage: acc.mean(),
                dominant_crop_type: acc.mode().to_string(),
            }
        })
        .collect::<Vec<_>>();

    debug!("[aggregate] {} observations -> {} states", observations.len(), summaries.len());

    Ok(StateSummaries::from_vec(summaries))
}
