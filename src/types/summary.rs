use std::collections::{HashMap, hash_map::Entry};

/// Aggregate statistics for a single state.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSummary {
    pub state: String,
    pub mean_drought_percentage: f64,
    pub dominant_crop_type: String,
}

/// One summary per distinct state, kept in first-appearance order with a key index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSummaries {
    summaries: Vec<StateSummary>,
    index: HashMap<String, usize>, // state -> position in `summaries`
}

impl StateSummaries {
    /// Build from summaries with distinct states. Later duplicates are ignored.
    pub fn from_vec(summaries: Vec<StateSummary>) -> Self {
        let mut index = HashMap::with_capacity(summaries.len());
        let summaries = summaries.into_iter()
            .filter(|summary| {
                let next = index.len();
                match index.entry(summary.state.clone()) {
                    Entry::Occupied(_) => false,
                    Entry::Vacant(slot) => { slot.insert(next); true }
                }
            })
            .collect();
        Self { summaries, index }
    }

    pub fn len(&self) -> usize { self.summaries.len() }

    pub fn is_empty(&self) -> bool { self.summaries.is_empty() }

    /// Exact, case-sensitive lookup by state name.
    pub fn get(&self, state: &str) -> Option<&StateSummary> {
        self.index.get(state).map(|&i| &self.summaries[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StateSummary> { self.summaries.iter() }

    pub fn as_slice(&self) -> &[StateSummary] { &self.summaries }
}

impl<'a> IntoIterator for &'a StateSummaries {
    type Item = &'a StateSummary;
    type IntoIter = std::slice::Iter<'a, StateSummary>;

    fn into_iter(self) -> Self::IntoIter { self.summaries.iter() }
}
