use std::collections::HashSet;

use serde::Serialize;

use crate::error::MapError;
use crate::index::IndexTable;
use crate::model::{Boundary, JoinedRegion};

/// Outcome of matching boundary names against the index table.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct JoinReport {
    pub matched: usize,
    /// Boundary names with no index record, in boundary order.
    pub unmatched_regions: Vec<String>,
    /// Index regions no boundary referred to, in table order.
    pub unused_index: Vec<String>,
}

impl JoinReport {
    pub fn is_complete(&self) -> bool {
        self.unmatched_regions.is_empty()
    }

    pub fn ensure_complete(&self) -> Result<(), MapError> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(MapError::UnmatchedRegions(self.unmatched_regions.clone()))
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Joined {
    pub regions: Vec<JoinedRegion>,
    pub report: JoinReport,
}

impl Joined {
    pub fn labelled(&self) -> impl Iterator<Item = &JoinedRegion> {
        self.regions.iter().filter(|r| r.is_labelled())
    }
}

/// Left join on exact name equality. Every boundary survives, in order.
pub fn left_join(boundaries: Vec<Boundary>, table: &IndexTable) -> Joined {
    let mut report = JoinReport::default();
    let mut used: HashSet<&str> = HashSet::new();
    let mut regions = Vec::with_capacity(boundaries.len());
    for b in boundaries {
        let record = table.records().iter().find(|r| r.region == b.name);
        match record {
            Some(rec) => {
                report.matched += 1;
                used.insert(rec.region.as_str());
            }
            None => {
                tracing::warn!(region = %b.name, "no index value for region; it will be left blank");
                report.unmatched_regions.push(b.name.clone());
            }
        }
        let ct_index = record.map(|r| r.ct_index);
        regions.push(JoinedRegion {
            name: b.name,
            geometry: b.geometry,
            properties: b.properties,
            ct_index,
        });
    }
    for r in table.records() {
        if !used.contains(r.region.as_str()) && !report.unused_index.contains(&r.region) {
            tracing::debug!(region = %r.region, "index value not used by any boundary");
            report.unused_index.push(r.region.clone());
        }
    }
    tracing::info!(
        regions = regions.len(),
        matched = report.matched,
        unmatched = report.unmatched_regions.len(),
        "joined boundaries with index table"
    );
    Joined { regions, report }
}
