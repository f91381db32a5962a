//! DrugBank records → pathway model.
//!
//! One synchronous sweep over the drugs:
//!
//! - each drug becomes a small molecule with its reference (`molecule`),
//! - each drug-target pair becomes a control whose controller is the molecule
//!   and whose controlled processes are protein state-change reactions
//!   (`target`, `protein`),
//! - external records and literature are interned as xrefs (`xref`).
//!
//! Entities are interned in the [`Model`], so a protein targeted by many drugs
//! yields a single reference, a single set of state variants and one reaction
//! per chemistry. Recoverable anomalies are collected in a
//! [`ConversionReport`] and never abort the run.

pub mod molecule;
pub mod protein;
pub mod report;
pub mod target;
pub mod xref;

pub use molecule::MoleculeBuilder;
pub use protein::{Chemistry, ProteinBuilder, ProteinState};
pub use report::{ConversionReport, ConversionWarning, WarningKind};
pub use target::{control_name, control_type_for, TargetBuilder};
pub use xref::{normalize_db, XrefKind};

use crate::record::Drug;
use drugpax_model::{Model, ModelError};
use serde::{Deserialize, Serialize};

/// Converter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Namespace prepended to every generated id.
    pub xml_base: String,
    /// Database named by each molecule's unification xref.
    pub drug_database: String,
    /// Database assumed for polypeptides with a blank `source`.
    pub default_protein_database: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            xml_base: String::new(),
            drug_database: "DrugBank".to_string(),
            default_protein_database: "UniProt".to_string(),
        }
    }
}

impl ConvertConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Result of one conversion run.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub model: Model,
    pub report: ConversionReport,
}

pub struct Converter {
    config: ConvertConfig,
}

impl Converter {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Convert `drugs` into a fresh model.
    pub fn convert(&self, drugs: &[Drug]) -> Result<Conversion, ModelError> {
        let mut model = Model::with_xml_base(self.config.xml_base.clone());
        let mut report = ConversionReport::default();
        self.convert_into(&mut model, &mut report, drugs)?;
        Ok(Conversion { model, report })
    }

    /// Convert `drugs` into an existing model, accumulating into `report`.
    pub fn convert_into(
        &self,
        model: &mut Model,
        report: &mut ConversionReport,
        drugs: &[Drug],
    ) -> Result<(), ModelError> {
        let molecules = MoleculeBuilder::new(&self.config);
        let targets = TargetBuilder::new(&self.config);

        for drug in drugs {
            let label = molecule::drug_label(drug);
            let molecule_id = molecules.build(model, report, drug)?;
            report.drugs += 1;

            for (ordinal, target) in drug.targets.iter().enumerate() {
                match targets.build(model, report, &label, &molecule_id, ordinal, target)? {
                    Some(control) if control.created => report.drug_targets += 1,
                    Some(control) => {
                        tracing::debug!(
                            drug = %label,
                            control = %control.id,
                            "control already present"
                        );
                    }
                    None => report.skipped_targets += 1,
                }
            }
        }

        tracing::info!(
            drugs = report.drugs,
            drug_targets = report.drug_targets,
            skipped_targets = report.skipped_targets,
            elements = model.len(),
            "conversion finished"
        );
        Ok(())
    }
}

/// Convert with the given settings.
pub fn convert(drugs: &[Drug], config: ConvertConfig) -> Result<Conversion, ModelError> {
    Converter::new(config).convert(drugs)
}
