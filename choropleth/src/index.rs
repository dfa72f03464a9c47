//! Region index table.
//!
//! The built-in values are placeholders for an externally computed CT
//! accessibility score; a JSON file of the same shape can replace them.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::error::MapError;
use crate::model::IndexRecord;

/// Documented domain of `CT_Index`. Not enforced.
pub const CT_INDEX_DOMAIN: (f64, f64) = (0.0, 1.0);

const EMBEDDED: [(&str, f64); 16] = [
    ("서울특별시", 0.92),
    ("부산광역시", 0.81),
    ("대구광역시", 0.78),
    ("인천광역시", 0.85),
    ("광주광역시", 0.74),
    ("대전광역시", 0.80),
    ("울산광역시", 0.76),
    ("경기도", 0.88),
    ("강원도", 0.63),
    ("충청북도", 0.69),
    ("충청남도", 0.71),
    ("전라북도", 0.66),
    ("전라남도", 0.60),
    ("경상북도", 0.68),
    ("경상남도", 0.73),
    ("제주특별자치도", 0.70),
];

#[derive(Clone, Debug, PartialEq)]
pub struct IndexTable {
    records: Vec<IndexRecord>,
}

impl IndexTable {
    /// One record per first-level division of South Korea.
    pub fn embedded() -> IndexTable {
        IndexTable {
            records: EMBEDDED
                .iter()
                .map(|&(region, ct_index)| IndexRecord { region: region.to_string(), ct_index })
                .collect(),
        }
    }

    pub fn new(records: Vec<IndexRecord>) -> IndexTable {
        let table = IndexTable { records };
        table.audit();
        table
    }

    /// Reads a JSON array of `{"region": .., "CT_Index": ..}` objects.
    pub fn from_reader<R: Read>(reader: R) -> Result<IndexTable, MapError> {
        let records: Vec<IndexRecord> = serde_json::from_reader(reader)?;
        Ok(IndexTable::new(records))
    }

    pub fn load(path: &Path) -> Result<IndexTable, MapError> {
        let file = std::fs::File::open(path).map_err(|e| MapError::io(path, e))?;
        let table = IndexTable::from_reader(std::io::BufReader::new(file))?;
        tracing::info!(path = %path.display(), records = table.len(), "loaded index table");
        Ok(table)
    }

    pub fn records(&self) -> &[IndexRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record whose region equals `name` exactly.
    pub fn lookup(&self, name: &str) -> Option<f64> {
        self.records.iter().find(|r| r.region == name).map(|r| r.ct_index)
    }

    /// Records outside the documented [0, 1] domain.
    pub fn out_of_domain(&self) -> impl Iterator<Item = &IndexRecord> {
        let (lo, hi) = CT_INDEX_DOMAIN;
        self.records.iter().filter(move |r| !(lo..=hi).contains(&r.ct_index))
    }

    /// Region names that occur more than once; only the first is joined.
    pub fn duplicates(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut dups = Vec::new();
        for r in &self.records {
            if !seen.insert(r.region.as_str()) && !dups.contains(&r.region.as_str()) {
                dups.push(r.region.as_str());
            }
        }
        dups
    }

    fn audit(&self) {
        for r in self.out_of_domain() {
            tracing::warn!(region = %r.region, value = r.ct_index, "CT_Index outside [0, 1]");
        }
        for name in self.duplicates() {
            tracing::warn!(region = %name, "duplicate region in index table; first value wins");
        }
    }
}

impl Default for IndexTable {
    fn default() -> Self {
        IndexTable::embedded()
    }
}
