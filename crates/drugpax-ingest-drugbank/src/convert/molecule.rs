//! Drug → small molecule + reference.

use super::report::{ConversionReport, WarningKind};
use super::xref::{self, XrefKind};
use super::ConvertConfig;
use crate::record::{Drug, ExperimentalProperty};
use drugpax_model::{
    hashed_id, local_id, random_id, ChemicalStructure, ElementKind, ElementVariant, Model,
    ModelError, Named, Names, Role, SmallMolecule, SmallMoleculeReference, StructureFormat,
    XrefHolder,
};

/// Label used for a drug in diagnostics: primary id, else name.
pub(crate) fn drug_label(drug: &Drug) -> String {
    match drug.primary_id() {
        Some(id) => id.to_string(),
        None if !drug.name.trim().is_empty() => drug.name.trim().to_string(),
        None => "<unidentified drug>".to_string(),
    }
}

fn set_drug_names<N: Named>(named: &mut N, drug: &Drug) {
    let name = drug.name.trim();
    if !name.is_empty() {
        named.set_preferred_name(name);
    }
    for synonym in &drug.synonyms {
        named.add_name(synonym);
    }
    for brand in &drug.brands {
        named.add_name(brand);
    }
}

pub struct MoleculeBuilder<'a> {
    config: &'a ConvertConfig,
}

impl<'a> MoleculeBuilder<'a> {
    pub fn new(config: &'a ConvertConfig) -> Self {
        Self { config }
    }

    /// Build the molecule for `drug` and return its id.
    pub fn build(
        &self,
        model: &mut Model,
        report: &mut ConversionReport,
        drug: &Drug,
    ) -> Result<String, ModelError> {
        let label = drug_label(drug);
        let primary = drug.primary_id();
        let (molecule_local, reference_local) = match primary {
            Some(id) => (
                local_id(Role::SmallMolecule, &[id]),
                local_id(Role::SmallMoleculeReference, &[id]),
            ),
            None => {
                report.warn(&label, WarningKind::MissingPrimaryId, &drug.name);
                (
                    random_id(Role::SmallMolecule),
                    random_id(Role::SmallMoleculeReference),
                )
            }
        };

        let interned = model.get_or_create(ElementKind::SmallMolecule, &molecule_local, |model, id| {
            let reference = self.reference(model, report, &label, &reference_local, drug)?;
            let mut molecule = SmallMolecule {
                id: id.to_string(),
                names: Names::default(),
                entity_reference: reference,
                comments: Vec::new(),
            };
            set_drug_names(&mut molecule, drug);
            let description = drug.description.trim();
            if !description.is_empty() {
                molecule.comments.push(description.to_string());
            }
            Ok(molecule.into_element())
        })?;

        if !interned.created {
            report.warn(&label, WarningKind::DuplicateDrugId, &interned.id);
        }
        Ok(interned.id)
    }

    fn reference(
        &self,
        model: &mut Model,
        report: &mut ConversionReport,
        label: &str,
        local: &str,
        drug: &Drug,
    ) -> Result<String, ModelError> {
        let interned = model.get_or_create(ElementKind::SmallMoleculeReference, local, |model, id| {
            let mut reference = SmallMoleculeReference {
                id: id.to_string(),
                ..Default::default()
            };
            set_drug_names(&mut reference, drug);

            if let Some(primary) = drug.primary_id() {
                let xref = xref::resolve(
                    model,
                    XrefKind::Unification,
                    primary,
                    &self.config.drug_database,
                )?;
                reference.add_xref(&xref);
            }

            for ext in &drug.external_identifiers {
                if ext.identifier.is_empty() {
                    continue;
                }
                let xref =
                    xref::resolve(model, XrefKind::Relationship, &ext.identifier, &ext.resource)?;
                reference.add_xref(&xref);
            }

            let refs = &drug.general_references;
            for article in &refs.articles {
                if let Some(xref) = xref::resolve_article(model, article)? {
                    reference.add_xref(&xref);
                }
            }
            for link in &refs.links {
                if let Some(xref) = xref::resolve_link(model, link)? {
                    reference.add_xref(&xref);
                }
            }
            for textbook in &refs.textbooks {
                if let Some(xref) = xref::resolve_textbook(model, textbook)? {
                    reference.add_xref(&xref);
                }
            }

            for property in &drug.experimental_properties {
                apply_property(model, report, label, &mut reference, property)?;
            }
            Ok(reference.into_element())
        })?;
        Ok(interned.id)
    }
}

fn apply_property(
    model: &mut Model,
    report: &mut ConversionReport,
    label: &str,
    reference: &mut SmallMoleculeReference,
    property: &ExperimentalProperty,
) -> Result<(), ModelError> {
    let Some(kind) = property.kind.as_deref().map(str::trim) else {
        return Ok(());
    };
    let value = property.value.trim();

    if kind.eq_ignore_ascii_case("Molecular Weight") {
        match value.parse::<f64>() {
            Ok(weight) if weight.is_finite() => reference.molecular_weight = Some(weight),
            _ => report.warn(label, WarningKind::UnparsableMolecularWeight, &property.value),
        }
    } else if kind.eq_ignore_ascii_case("Molecular Formula") {
        reference.chemical_formula = Some(value.to_string());
    } else if kind.eq_ignore_ascii_case("SMILES") {
        if !value.is_empty() {
            reference.structure = Some(chemical_structure(model, value)?);
        }
    } else {
        tracing::debug!(drug = %label, kind = %kind, "skipping experimental property");
    }
    Ok(())
}

/// SMILES structure, interned by a digest of the structure string.
fn chemical_structure(model: &mut Model, smiles: &str) -> Result<String, ModelError> {
    let local = hashed_id(Role::ChemicalStructure, &[smiles]);
    let interned = model.get_or_create(ElementKind::ChemicalStructure, &local, |_, id| {
        Ok(ChemicalStructure {
            id: id.to_string(),
            structure_format: StructureFormat::Smiles,
            structure_data: smiles.to_string(),
        }
        .into_element())
    })?;
    Ok(interned.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Article, DrugId, ExternalIdentifier, GeneralReferences, Link};
    use drugpax_model::{PublicationXref, XrefHolder};

    fn aspirin() -> Drug {
        Drug {
            ids: vec![DrugId {
                value: "DB00945".to_string(),
                primary: true,
            }],
            name: "Aspirin".to_string(),
            description: "The prototypical analgesic.".to_string(),
            synonyms: vec!["Acetylsalicylic acid".to_string()],
            brands: vec!["Aspro".to_string()],
            external_identifiers: vec![ExternalIdentifier {
                resource: "ChEBI".to_string(),
                identifier: "15365".to_string(),
            }],
            general_references: GeneralReferences {
                articles: vec![Article {
                    pubmed_id: "10592235".to_string(),
                    citation: "Vane JR".to_string(),
                }],
                links: vec![Link {
                    title: "Label".to_string(),
                    url: "https://example.org/aspirin.pdf".to_string(),
                }],
                textbooks: Vec::new(),
            },
            experimental_properties: vec![
                ExperimentalProperty {
                    kind: Some("Molecular Weight".to_string()),
                    value: "180.16".to_string(),
                    source: None,
                },
                ExperimentalProperty {
                    kind: Some("molecular formula".to_string()),
                    value: "C9H8O4".to_string(),
                    source: None,
                },
                ExperimentalProperty {
                    kind: Some("SMILES".to_string()),
                    value: "CC(=O)OC1=CC=CC=C1C(O)=O".to_string(),
                    source: None,
                },
                ExperimentalProperty {
                    kind: Some("Melting Point".to_string()),
                    value: "135 °C".to_string(),
                    source: None,
                },
                ExperimentalProperty {
                    kind: None,
                    value: "ignored".to_string(),
                    source: None,
                },
            ],
            ..Default::default()
        }
    }

    fn build(drug: &Drug) -> (Model, ConversionReport, String) {
        let config = ConvertConfig::default();
        let mut model = Model::new();
        let mut report = ConversionReport::default();
        let id = MoleculeBuilder::new(&config)
            .build(&mut model, &mut report, drug)
            .unwrap();
        (model, report, id)
    }

    #[test]
    fn molecule_is_keyed_by_primary_id() {
        let (model, report, id) = build(&aspirin());
        assert_eq!(id, "sm_DB00945");
        let molecule = model.get_as::<SmallMolecule>(&id).unwrap();
        assert_eq!(molecule.entity_reference, "smr_DB00945");
        assert_eq!(molecule.comments, vec!["The prototypical analgesic."]);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn property_values_are_trimmed() {
        let mut drug = aspirin();
        drug.experimental_properties = vec![
            ExperimentalProperty {
                kind: Some(" Molecular Formula ".to_string()),
                value: "  C9H8O4 \n".to_string(),
                source: None,
            },
            ExperimentalProperty {
                kind: Some("Molecular Weight".to_string()),
                value: " 180.16\n".to_string(),
                source: None,
            },
        ];
        let (model, report, _) = build(&drug);
        let reference = model.get_as::<SmallMoleculeReference>("smr_DB00945").unwrap();
        assert_eq!(reference.chemical_formula.as_deref(), Some("C9H8O4"));
        assert_eq!(reference.molecular_weight, Some(180.16));
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn names_are_copied_onto_both_molecule_and_reference() {
        let (model, _, id) = build(&aspirin());
        let molecule = model.get_as::<SmallMolecule>(&id).unwrap();
        let reference = model
            .get_as::<SmallMoleculeReference>(&molecule.entity_reference)
            .unwrap();
        for named in [molecule.names(), reference.names()] {
            assert_eq!(named.display_name.as_deref(), Some("Aspirin"));
            assert_eq!(named.standard_name.as_deref(), Some("Aspirin"));
            assert!(named.names.contains("Acetylsalicylic acid"));
            assert!(named.names.contains("Aspro"));
        }
    }

    #[test]
    fn reference_carries_properties() {
        let (model, _, _) = build(&aspirin());
        let reference = model.get_as::<SmallMoleculeReference>("smr_DB00945").unwrap();
        assert_eq!(reference.molecular_weight, Some(180.16));
        assert_eq!(reference.chemical_formula.as_deref(), Some("C9H8O4"));
        let structure = model
            .get_as::<ChemicalStructure>(reference.structure.as_deref().unwrap())
            .unwrap();
        assert_eq!(structure.structure_data, "CC(=O)OC1=CC=CC=C1C(O)=O");
        assert_eq!(structure.structure_format, StructureFormat::Smiles);
    }

    #[test]
    fn reference_carries_drugbank_external_and_literature_xrefs() {
        let (model, _, _) = build(&aspirin());
        let reference = model.get_as::<SmallMoleculeReference>("smr_DB00945").unwrap();
        // DrugBank unification, ChEBI relationship, PubMed article, link
        assert_eq!(reference.xrefs().len(), 4);
        let drugbank = reference
            .xrefs()
            .iter()
            .filter_map(|id| model.get(id))
            .find(|e| e.kind() == ElementKind::UnificationXref)
            .and_then(|e| e.as_xref())
            .unwrap();
        assert_eq!(drugbank.db, "DrugBank");
        assert_eq!(drugbank.accession, "DB00945");
        assert!(reference
            .xrefs()
            .contains("https://bioregistry.io/pubmed:10592235"));
        let link = model
            .elements_of::<PublicationXref>()
            .find(|p| p.urls.contains("https://example.org/aspirin.pdf"))
            .unwrap();
        assert!(link.sources.contains("Label"));
    }

    #[test]
    fn unparsable_weight_is_skipped_with_warning() {
        let mut drug = aspirin();
        drug.experimental_properties = vec![ExperimentalProperty {
            kind: Some("Molecular Weight".to_string()),
            value: "unknown".to_string(),
            source: None,
        }];
        let (model, report, _) = build(&drug);
        let reference = model.get_as::<SmallMoleculeReference>("smr_DB00945").unwrap();
        assert_eq!(reference.molecular_weight, None);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].kind, WarningKind::UnparsableMolecularWeight);
        assert_eq!(report.warnings[0].drug, "DB00945");
        assert_eq!(report.warnings[0].value, "unknown");
    }

    #[test]
    fn missing_primary_id_falls_back_to_random_id() {
        let mut drug = aspirin();
        drug.ids[0].primary = false;
        let (model, report, id) = build(&drug);
        assert!(id.starts_with("sm_"));
        assert_ne!(id, "sm_DB00945");
        assert_eq!(
            report.warnings_of(WarningKind::MissingPrimaryId).count(),
            1
        );
        let molecule = model.get_as::<SmallMolecule>(&id).unwrap();
        let reference = model
            .get_as::<SmallMoleculeReference>(&molecule.entity_reference)
            .unwrap();
        // no DrugBank unification xref without a primary id
        assert!(reference
            .xrefs()
            .iter()
            .filter_map(|x| model.get(x))
            .all(|e| e.kind() != ElementKind::UnificationXref));
    }

    #[test]
    fn duplicate_drug_reuses_first_molecule() {
        let config = ConvertConfig::default();
        let builder = MoleculeBuilder::new(&config);
        let mut model = Model::new();
        let mut report = ConversionReport::default();
        let a = builder.build(&mut model, &mut report, &aspirin()).unwrap();
        let size = model.len();
        let b = builder.build(&mut model, &mut report, &aspirin()).unwrap();
        assert_eq!(a, b);
        assert_eq!(model.len(), size);
        assert_eq!(report.warnings_of(WarningKind::DuplicateDrugId).count(), 1);
    }
}
