use serde::{Deserialize, Serialize};

/// A finished run, as handed to the persistence collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub score: u64,
    pub level: u32,
    /// Unix seconds at the moment the run ended.
    pub timestamp: u64,
}

/// Top-N table of records, highest score first.
///
/// The simulation never owns one of these; it exists so persistence
/// collaborators share the same ordering and truncation rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScoreTable {
    records: Vec<HighScoreRecord>,
}

impl HighScoreTable {
    pub const CAPACITY: usize = 10;

    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a table from JSON, re-applying ordering and truncation.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let records: Vec<HighScoreRecord> = serde_json::from_str(json)?;
        let mut table = Self { records };
        table.normalize();
        Ok(table)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.records)
    }

    /// Insert a record. Returns its rank (0-based) if it made the table.
    pub fn insert(&mut self, record: HighScoreRecord) -> Option<usize> {
        // Ties keep earlier records ahead.
        let rank = self
            .records
            .iter()
            .position(|r| r.score < record.score)
            .unwrap_or(self.records.len());
        if rank >= Self::CAPACITY {
            return None;
        }
        self.records.insert(rank, record);
        self.records.truncate(Self::CAPACITY);
        Some(rank)
    }

    pub fn records(&self) -> &[HighScoreRecord] {
        &self.records
    }

    pub fn best(&self) -> Option<&HighScoreRecord> {
        self.records.first()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn normalize(&mut self) {
        self.records.sort_by(|a, b| b.score.cmp(&a.score));
        self.records.truncate(Self::CAPACITY);
    }
}
