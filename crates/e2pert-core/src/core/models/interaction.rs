use std::fmt;

/// Column titles of an interaction table, in output order.
pub const TABLE_HEADER: [&str; 6] = [
    "Donor orbital",
    "Acceptor orbital",
    "Donor occupancy",
    "Acceptor occupancy",
    "Charge transfer (e)",
    "E2 energy (kcal/mol)",
];

/// An orbital taking part in an interaction: its 0-based position and display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrbitalRef {
    pub index: usize,
    pub label: String,
}

impl OrbitalRef {
    pub fn new(index: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
        }
    }
}

impl fmt::Display for OrbitalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.index + 1)
    }
}

/// One donor→acceptor interaction. Numeric fields are already rounded to their
/// reporting precision.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionRecord {
    pub donor: OrbitalRef,
    pub acceptor: OrbitalRef,
    pub donor_occupancy: f64,
    pub acceptor_occupancy: f64,
    pub charge_transfer: f64, // qCT, in electrons
    pub e2_energy: f64,       // kcal/mol
}

impl InteractionRecord {
    /// Renders the record as the six table cells.
    pub fn cells(&self) -> [String; 6] {
        [
            self.donor.to_string(),
            self.acceptor.to_string(),
            format!("{:.4}", self.donor_occupancy),
            format!("{:.4}", self.acceptor_occupancy),
            format!("{:.4}", self.charge_transfer),
            format!("{:.2}", self.e2_energy),
        ]
    }
}

/// Ordered result of an interaction scan.
///
/// Records keep the order in which donor/acceptor pairs were visited (donor index
/// outer, acceptor index inner); the table is never re-sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionTable {
    records: Vec<InteractionRecord>,
}

impl InteractionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&self) -> [&'static str; 6] {
        TABLE_HEADER
    }

    pub(crate) fn push(&mut self, record: InteractionRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[InteractionRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InteractionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<InteractionRecord> {
        self.records
    }
}

impl From<Vec<InteractionRecord>> for InteractionTable {
    fn from(records: Vec<InteractionRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a InteractionTable {
    type Item = &'a InteractionRecord;
    type IntoIter = std::slice::Iter<'a, InteractionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
