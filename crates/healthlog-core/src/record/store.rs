use super::HealthRecord;

/// Append-only, insertion-ordered sequence of accepted records.
///
/// Records are never sorted, merged or removed; two records with the same
/// date both stay, in the order they were appended.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<HealthRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an already-validated record at the end of the sequence.
    pub fn append(&mut self, record: HealthRecord) -> &[HealthRecord] {
        tracing::debug!(date = record.date(), weight = record.weight(), "record appended");
        self.records.push(record);
        &self.records
    }

    pub fn records(&self) -> &[HealthRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&HealthRecord> {
        self.records.last()
    }
}
