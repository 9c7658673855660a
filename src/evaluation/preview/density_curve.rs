use crate::evaluation::Snapshot;

/// Ordered snapshots of a prequential run.
#[derive(Debug, Default, Clone)]
pub struct DensityCurve {
    entries: Vec<Snapshot>,
}

impl DensityCurve {
    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.push(snapshot)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[Snapshot] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.entries.iter()
    }
}
