//! Run totals and recoverable anomalies.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// No drug id flagged primary; a random id was used.
    MissingPrimaryId,
    /// A drug id appeared twice; the first molecule was reused.
    DuplicateDrugId,
    /// "Molecular Weight" value did not parse; the weight stays unset.
    UnparsableMolecularWeight,
    /// Polypeptide without an id; keyed by its names instead.
    MissingPolypeptideId,
    /// Target lists no polypeptide, so no control can be built.
    TargetWithoutPolypeptides,
}

impl WarningKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WarningKind::MissingPrimaryId => "drug has no primary id",
            WarningKind::DuplicateDrugId => "duplicate drug id",
            WarningKind::UnparsableMolecularWeight => "couldn't parse molecular weight",
            WarningKind::MissingPolypeptideId => "polypeptide has no id",
            WarningKind::TargetWithoutPolypeptides => "target has no polypeptides",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionWarning {
    /// Primary id (or name) of the drug being converted.
    pub drug: String,
    pub kind: WarningKind,
    /// The offending value.
    pub value: String,
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} for drug {}: {}", self.kind, self.drug, self.value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    pub drugs: usize,
    /// Drug-target pairs turned into controls.
    pub drug_targets: usize,
    pub skipped_targets: usize,
    pub warnings: Vec<ConversionWarning>,
}

impl ConversionReport {
    /// Record a recoverable anomaly and log it.
    pub fn warn(&mut self, drug: &str, kind: WarningKind, value: &str) {
        tracing::warn!(drug = %drug, value = %value, "{kind}");
        self.warnings.push(ConversionWarning {
            drug: drug.to_string(),
            kind,
            value: value.to_string(),
        });
    }

    pub fn warnings_of(&self, kind: WarningKind) -> impl Iterator<Item = &ConversionWarning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }
}
