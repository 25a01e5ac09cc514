//! Left outer join of boundary polygons onto state summaries.

use std::{borrow::Cow, collections::HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::{CombinedRecord, RegionPolygon, StateSummaries};

/// How region names and state names are compared.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum KeyNormalization {
    /// Case-sensitive, byte-for-byte comparison.
    #[default]
    Exact,
    /// Ignore leading and trailing whitespace.
    Trim,
    /// Ignore surrounding whitespace and letter case.
    CaseInsensitive,
}

impl KeyNormalization {
    /// Canonical form of a join key under this policy.
    pub fn normalize<'a>(&self, key: &'a str) -> Cow<'a, str> {
        match self {
            KeyNormalization::Exact => Cow::Borrowed(key),
            KeyNormalization::Trim => Cow::Borrowed(key.trim()),
            KeyNormalization::CaseInsensitive => Cow::Owned(key.trim().to_lowercase()),
        }
    }
}

/// Keys on either side of the join that found no partner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinReport {
    pub unmatched_regions: Vec<String>, // Polygon order
    pub unmatched_states: Vec<String>,  // Summary order
}

impl JoinReport {
    pub fn is_clean(&self) -> bool {
        self.unmatched_regions.is_empty() && self.unmatched_states.is_empty()
    }
}

/// Output of [`join`]: one record per input polygon plus the advisory report.
#[derive(Debug, Clone, PartialEq)]
pub struct Joined {
    pub records: Vec<CombinedRecord>,
    pub report: JoinReport,
}

/// Attach summaries to polygons by name. Every polygon yields exactly one record,
/// in input order; unmatched polygons carry `None` aggregate fields.
pub fn join(polygons: Vec<RegionPolygon>, summaries: &StateSummaries, normalization: KeyNormalization) -> Joined {
    // Normalized key -> summary index. The first summary wins if two states collapse to one key.
    let rows = summaries.as_slice();
    let mut lookup: HashMap<Cow<str>, usize> = HashMap::with_capacity(rows.len());
    for (i, summary) in rows.iter().enumerate() {
        let key = normalization.normalize(&summary.state);
        if let Some(&first) = lookup.get(&*key) {
            warn!(
                "[join] states {:?} and {:?} share the key {:?}; keeping the first",
                rows[first].state, summary.state, key
            );
            continue;
        }
        lookup.insert(key, i);
    }

    let mut used = vec![false; rows.len()];
    let mut report = JoinReport::default();

    let records = polygons.into_iter()
        .map(|polygon| {
            let matched = lookup.get(&*normalization.normalize(&polygon.region_name))
                .map(|&i| { used[i] = true; &rows[i] });
            if matched.is_none() {
                report.unmatched_regions.push(polygon.region_name.clone());
            }
            CombinedRecord {
                region_name: polygon.region_name,
                geometry: polygon.geometry,
                mean_drought_percentage: matched.map(|s| s.mean_drought_percentage),
                dominant_crop_type: matched.map(|s| s.dominant_crop_type.clone()),
            }
        })
        .collect::<Vec<_>>();

    report.unmatched_states = rows.iter()
        .zip(&used)
        .filter(|(_, used)| !**used)
        .map(|(summary, _)| summary.state.clone())
        .collect();

    debug!(
        "[join] {} polygons, {} matched, {} unmatched regions, {} unmatched states",
        records.len(),
        records.iter().filter(|r| r.is_matched()).count(),
        report.unmatched_regions.len(),
        report.unmatched_states.len(),
    );

    Joined { records, report }
}

#[cfg(test)]
mod tests {
    use geo::{polygon, MultiPolygon};

    use super::{join, KeyNormalization};
    use crate::types::{RegionPolygon, StateSummaries, StateSummary};

    fn region(name: &str) -> RegionPolygon {
        RegionPolygon::new(
            name,
            MultiPolygon(vec![polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)]]),
        )
    }

    fn summaries(rows: &[(&str, f64, &str)]) -> StateSummaries {
        StateSummaries::from_vec(rows.iter()
            .map(|&(state, mean, crop)| StateSummary {
                state: state.into(),
                mean_drought_percentage: mean,
                dominant_crop_type: crop.into(),
            })
            .collect())
    }

    #[test]
    fn one_record_per_polygon() {
        let polygons = vec![region("Kerala"), region("Goa"), region("Punjab"), region("Kerala")];
        let joined = join(polygons, &summaries(&[("Kerala", 50.0, "Rice")]), KeyNormalization::Exact);
        assert_eq!(joined.records.len(), 4);
        let names = joined.records.iter().map(|r| r.region_name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["Kerala", "Goa", "Punjab", "Kerala"]);
    }

    #[test]
    fn empty_summaries_keep_every_polygon() {
        let joined = join(vec![region("A"), region("B")], &StateSummaries::default(), KeyNormalization::Exact);
        assert_eq!(joined.records.len(), 2);
        assert!(joined.records.iter().all(|r| !r.is_matched()));
    }

    #[test]
    fn unmatched_polygon_has_null_fields() {
        let joined = join(
            vec![region("Kerala"), region("Goa")],
            &summaries(&[("Kerala", 50.0, "Rice"), ("Punjab", 10.0, "Wheat")]),
            KeyNormalization::Exact,
        );

        let kerala = &joined.records[0];
        assert_eq!(kerala.mean_drought_percentage, Some(50.0));
        assert_eq!(kerala.dominant_crop_type.as_deref(), Some("Rice"));

        let goa = &joined.records[1];
        assert_eq!(goa.mean_drought_percentage, None);
        assert_eq!(goa.dominant_crop_type, None);

        assert_eq!(joined.report.unmatched_regions, ["Goa"]);
        assert_eq!(joined.report.unmatched_states, ["Punjab"]);
        assert!(!joined.report.is_clean());
    }

    #[test]
    fn exact_is_case_and_space_sensitive() {
        let joined = join(
            vec![region("kerala"), region("Kerala ")],
            &summaries(&[("Kerala", 50.0, "Rice")]),
            KeyNormalization::Exact,
        );
        assert!(joined.records.iter().all(|r| !r.is_matched()));
    }

    #[test]
    fn trim_ignores_surrounding_space() {
        let joined = join(
            vec![region(" Kerala ")],
            &summaries(&[("Kerala", 50.0, "Rice")]),
            KeyNormalization::Trim,
        );
        assert!(joined.records[0].is_matched());
        assert!(joined.report.is_clean());
    }

    #[test]
    fn case_insensitive_matches_mixed_case() {
        let joined = join(
            vec![region("TAMIL NADU"), region("tamil nadu")],
            &summaries(&[("Tamil Nadu", 12.5, "Millet")]),
            KeyNormalization::CaseInsensitive,
        );
        assert!(joined.records.iter().all(|r| r.mean_drought_percentage == Some(12.5)));
        assert!(joined.report.unmatched_states.is_empty());
    }

    #[test]
    fn geometry_is_carried_through() {
        let input = region("Kerala");
        let geometry = input.geometry.clone();
        let joined = join(vec![input], &summaries(&[]), KeyNormalization::Exact);
        assert_eq!(joined.records[0].geometry, geometry);
    }
}
