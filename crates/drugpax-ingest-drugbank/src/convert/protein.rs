//! Protein references, state variants and the reactions between them.

use super::report::{ConversionReport, WarningKind};
use super::xref::{self, XrefKind};
use super::ConvertConfig;
use crate::record::Polypeptide;
use drugpax_model::digest::fnv1a64_parts_hex;
use drugpax_model::{
    hashed_id, local_id, random_id, BioSource, BiochemicalReaction, ConversionDirection,
    ElementKind, ElementVariant, Model, ModelError, ModificationFeature, Named, Names, Protein,
    ProteinReference, Role, SequenceModificationVocabulary, XrefHolder,
};
use std::collections::BTreeSet;

/// What a drug does to its target, chemically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chemistry {
    /// Active → inactive.
    Plain,
    /// Unmodified → acetylated.
    Acetylation,
}

impl Chemistry {
    /// `Acetylation` if any action is "acetylation" (case-insensitive).
    pub fn classify<S: AsRef<str>>(actions: &[S]) -> Self {
        if actions
            .iter()
            .any(|a| a.as_ref().trim().eq_ignore_ascii_case("acetylation"))
        {
            Chemistry::Acetylation
        } else {
            Chemistry::Plain
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Chemistry::Plain => "plain",
            Chemistry::Acetylation => "acetylation",
        }
    }

    /// Left and right participant states, always in this direction.
    pub fn states(self) -> (ProteinState, ProteinState) {
        match self {
            Chemistry::Plain => (ProteinState::Active, ProteinState::Inactive),
            Chemistry::Acetylation => (ProteinState::Unmodified, ProteinState::Acetylated),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProteinState {
    Unmodified,
    Active,
    Inactive,
    Acetylated,
}

impl ProteinState {
    pub fn label(self) -> &'static str {
        match self {
            ProteinState::Unmodified => "unmodified",
            ProteinState::Active => "active",
            ProteinState::Inactive => "inactive",
            ProteinState::Acetylated => "acetylated",
        }
    }

    /// Sequence-modification term; `None` for the unmodified form.
    pub fn modification_term(self) -> Option<&'static str> {
        match self {
            ProteinState::Unmodified => None,
            other => Some(other.label()),
        }
    }
}

/// Gene name is the preferred name; the full name is kept as a variant.
pub(crate) fn set_polypeptide_names<N: Named>(named: &mut N, polypeptide: &Polypeptide) {
    let preferred = match polypeptide.gene_name.as_deref().map(str::trim) {
        Some(gene) if !gene.is_empty() => {
            named.add_name(&polypeptide.name);
            gene
        }
        _ => polypeptide.name.trim(),
    };
    if !preferred.is_empty() {
        named.set_preferred_name(preferred);
    }
    for synonym in &polypeptide.synonyms {
        named.add_name(synonym);
    }
}

/// Builds (or reuses) everything hanging off one polypeptide.
pub struct ProteinBuilder<'a> {
    config: &'a ConvertConfig,
}

impl<'a> ProteinBuilder<'a> {
    pub fn new(config: &'a ConvertConfig) -> Self {
        Self { config }
    }

    /// Stable key for a polypeptide: its id, else a digest of its names.
    ///
    /// Polypeptides with no id and no names get a random key and a warning.
    pub fn key(&self, report: &mut ConversionReport, drug: &str, polypeptide: &Polypeptide) -> String {
        let id = polypeptide.id.trim();
        if !id.is_empty() {
            return id.to_string();
        }
        let gene = polypeptide.gene_name.as_deref().unwrap_or("").trim();
        let name = polypeptide.name.trim();
        if gene.is_empty() && name.is_empty() {
            report.warn(drug, WarningKind::MissingPolypeptideId, "<no id or name>");
            let random = random_id(Role::ProteinReference);
            return random[Role::ProteinReference.prefix().len() + 1..].to_string();
        }
        report.warn(drug, WarningKind::MissingPolypeptideId, name);
        let organism = polypeptide.organism.as_deref().unwrap_or("");
        format!("anon-{}", fnv1a64_parts_hex(&[gene, name, organism]))
    }

    /// The one reaction for `(polypeptide, chemistry)`.
    pub fn reaction(
        &self,
        model: &mut Model,
        key: &str,
        polypeptide: &Polypeptide,
        chemistry: Chemistry,
    ) -> Result<String, ModelError> {
        let local = local_id(Role::Reaction, &[chemistry.tag(), key]);
        let interned = model.get_or_create(ElementKind::BiochemicalReaction, &local, |model, id| {
            let (from, to) = chemistry.states();
            let left = self.variant(model, key, polypeptide, from)?;
            let right = self.variant(model, key, polypeptide, to)?;
            Ok(BiochemicalReaction {
                id: id.to_string(),
                left: vec![left],
                right: vec![right],
                conversion_direction: ConversionDirection::LeftToRight,
            }
            .into_element())
        })?;
        Ok(interned.id)
    }

    /// The protein for `polypeptide` in `state`.
    pub fn variant(
        &self,
        model: &mut Model,
        key: &str,
        polypeptide: &Polypeptide,
        state: ProteinState,
    ) -> Result<String, ModelError> {
        let reference_id = self.reference(model, key, polypeptide)?;
        let local = local_id(Role::Protein, &[state.label(), key]);
        let interned = model.get_or_create(ElementKind::Protein, &local, |model, id| {
            let mut protein = Protein {
                id: id.to_string(),
                names: Names::default(),
                entity_reference: reference_id.clone(),
                features: BTreeSet::new(),
            };
            set_polypeptide_names(&mut protein, polypeptide);

            if let Some(term) = state.modification_term() {
                let feature = modification_feature(model, key, term)?;
                model
                    .get_as_mut::<ProteinReference>(&reference_id)?
                    .entity_features
                    .insert(feature.clone());
                protein.features.insert(feature);
            }
            Ok(protein.into_element())
        })?;
        Ok(interned.id)
    }

    /// State-independent reference, created once per polypeptide.
    fn reference(
        &self,
        model: &mut Model,
        key: &str,
        polypeptide: &Polypeptide,
    ) -> Result<String, ModelError> {
        let local = local_id(Role::ProteinReference, &[key]);
        let interned = model.get_or_create(ElementKind::ProteinReference, &local, |model, id| {
            let mut reference = ProteinReference {
                id: id.to_string(),
                ..Default::default()
            };
            set_polypeptide_names(&mut reference, polypeptide);

            let accession = polypeptide.id.trim();
            if !accession.is_empty() {
                let db = polypeptide
                    .source
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .unwrap_or(self.config.default_protein_database.as_str());
                let xref = xref::resolve(model, XrefKind::Unification, accession, db)?;
                reference.add_xref(&xref);
            }

            for ext in &polypeptide.external_identifiers {
                if ext.identifier.is_empty() {
                    continue;
                }
                let xref =
                    xref::resolve(model, XrefKind::Relationship, &ext.identifier, &ext.resource)?;
                reference.add_xref(&xref);
            }

            if let Some(organism) = polypeptide.organism.as_deref().map(str::trim) {
                if !organism.is_empty() {
                    reference.organism = Some(bio_source(model, organism)?);
                }
            }
            Ok(reference.into_element())
        })?;
        Ok(interned.id)
    }
}

/// Organism, interned by name.
fn bio_source(model: &mut Model, organism: &str) -> Result<String, ModelError> {
    let local = hashed_id(Role::BioSource, &[organism]);
    let interned = model.get_or_create(ElementKind::BioSource, &local, |_, id| {
        let mut source = BioSource {
            id: id.to_string(),
            names: Names::default(),
        };
        source.set_preferred_name(organism);
        Ok(source.into_element())
    })?;
    Ok(interned.id)
}

fn modification_feature(model: &mut Model, key: &str, term: &str) -> Result<String, ModelError> {
    let local = local_id(Role::ModificationFeature, &[term, key]);
    let interned = model.get_or_create(ElementKind::ModificationFeature, &local, |model, id| {
        Ok(ModificationFeature {
            id: id.to_string(),
            modification_type: vocabulary(model, term)?,
        }
        .into_element())
    })?;
    Ok(interned.id)
}

/// Sequence-modification term, shared by every protein.
fn vocabulary(model: &mut Model, term: &str) -> Result<String, ModelError> {
    let local = local_id(Role::Vocabulary, &[term]);
    let interned = model.get_or_create(
        ElementKind::SequenceModificationVocabulary,
        &local,
        |_, id| {
            Ok(SequenceModificationVocabulary {
                id: id.to_string(),
                terms: [term.to_string()].into(),
            }
            .into_element())
        },
    )?;
    Ok(interned.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ExternalIdentifier;

    fn ptgs1() -> Polypeptide {
        Polypeptide {
            id: "P23219".to_string(),
            source: Some("Swiss-Prot".to_string()),
            name: "Prostaglandin G/H synthase 1".to_string(),
            gene_name: Some("PTGS1".to_string()),
            organism: Some("Humans".to_string()),
            synonyms: vec!["COX-1".to_string()],
            external_identifiers: vec![ExternalIdentifier {
                resource: "HUGO Gene Nomenclature Committee (HGNC)".to_string(),
                identifier: "HGNC:9604".to_string(),
            }],
        }
    }

    #[test]
    fn chemistry_classification() {
        assert_eq!(Chemistry::classify(&["inhibitor"]), Chemistry::Plain);
        assert_eq!(
            Chemistry::classify(&["inhibitor", "Acetylation"]),
            Chemistry::Acetylation
        );
        assert_eq!(Chemistry::classify::<&str>(&[]), Chemistry::Plain);
    }

    #[test]
    fn plain_reaction_goes_active_to_inactive() {
        let config = ConvertConfig::default();
        let builder = ProteinBuilder::new(&config);
        let mut model = Model::new();
        let rxn = builder
            .reaction(&mut model, "P23219", &ptgs1(), Chemistry::Plain)
            .unwrap();
        assert_eq!(rxn, "rxn_plain_P23219");
        let reaction = model.get_as::<BiochemicalReaction>(&rxn).unwrap();
        assert_eq!(reaction.left, vec!["protein_active_P23219"]);
        assert_eq!(reaction.right, vec!["protein_inactive_P23219"]);
        assert_eq!(reaction.conversion_direction, ConversionDirection::LeftToRight);
    }

    #[test]
    fn acetylation_starts_from_unmodified_protein() {
        let config = ConvertConfig::default();
        let builder = ProteinBuilder::new(&config);
        let mut model = Model::new();
        let rxn = builder
            .reaction(&mut model, "P23219", &ptgs1(), Chemistry::Acetylation)
            .unwrap();
        let reaction = model.get_as::<BiochemicalReaction>(&rxn).unwrap();
        let left = model.get_as::<Protein>(&reaction.left[0]).unwrap();
        let right = model.get_as::<Protein>(&reaction.right[0]).unwrap();
        assert_eq!(left.id, "protein_unmodified_P23219");
        assert!(left.features.is_empty());
        assert_eq!(right.features.len(), 1);
        let feature = model
            .get_as::<ModificationFeature>(right.features.iter().next().unwrap())
            .unwrap();
        assert_eq!(feature.modification_type, "vocab_acetylated");
    }

    #[test]
    fn reference_is_shared_by_all_variants() {
        let config = ConvertConfig::default();
        let builder = ProteinBuilder::new(&config);
        let mut model = Model::new();
        builder
            .reaction(&mut model, "P23219", &ptgs1(), Chemistry::Plain)
            .unwrap();
        builder
            .reaction(&mut model, "P23219", &ptgs1(), Chemistry::Acetylation)
            .unwrap();
        assert_eq!(model.elements_of::<ProteinReference>().count(), 1);
        let reference = model.get_as::<ProteinReference>("pr_P23219").unwrap();
        // active, inactive, acetylated
        assert_eq!(reference.entity_features.len(), 3);
        assert_eq!(model.elements_of::<Protein>().count(), 4);
        assert_eq!(model.elements_of::<BioSource>().count(), 1);
    }

    #[test]
    fn vocabulary_terms_are_global() {
        let config = ConvertConfig::default();
        let builder = ProteinBuilder::new(&config);
        let mut model = Model::new();
        let mut other = ptgs1();
        other.id = "P35354".to_string();
        other.gene_name = Some("PTGS2".to_string());
        builder
            .reaction(&mut model, "P23219", &ptgs1(), Chemistry::Plain)
            .unwrap();
        builder
            .reaction(&mut model, "P35354", &other, Chemistry::Plain)
            .unwrap();
        assert_eq!(
            model.elements_of::<SequenceModificationVocabulary>().count(),
            2
        );
        assert_eq!(model.elements_of::<ModificationFeature>().count(), 4);
    }

    #[test]
    fn gene_name_is_preferred() {
        let config = ConvertConfig::default();
        let builder = ProteinBuilder::new(&config);
        let mut model = Model::new();
        builder
            .variant(&mut model, "P23219", &ptgs1(), ProteinState::Active)
            .unwrap();
        let reference = model.get_as::<ProteinReference>("pr_P23219").unwrap();
        assert_eq!(reference.display_name(), Some("PTGS1"));
        assert!(reference.names.names.contains("Prostaglandin G/H synthase 1"));
        assert!(reference.names.names.contains("COX-1"));
    }

    #[test]
    fn full_name_is_used_without_gene_name() {
        let mut polypeptide = ptgs1();
        polypeptide.gene_name = None;
        let config = ConvertConfig::default();
        let builder = ProteinBuilder::new(&config);
        let mut model = Model::new();
        let id = builder
            .variant(&mut model, "P23219", &polypeptide, ProteinState::Inactive)
            .unwrap();
        let protein = model.get_as::<Protein>(&id).unwrap();
        assert_eq!(protein.display_name(), Some("Prostaglandin G/H synthase 1"));
    }

    #[test]
    fn blank_source_defaults_to_uniprot() {
        let mut polypeptide = ptgs1();
        polypeptide.source = None;
        let config = ConvertConfig::default();
        let builder = ProteinBuilder::new(&config);
        let mut model = Model::new();
        builder
            .variant(&mut model, "P23219", &polypeptide, ProteinState::Active)
            .unwrap();
        let reference = model.get_as::<ProteinReference>("pr_P23219").unwrap();
        let unification: Vec<_> = reference
            .xrefs
            .iter()
            .filter_map(|id| model.get(id))
            .filter(|e| e.kind() == ElementKind::UnificationXref)
            .filter_map(|e| e.as_xref())
            .collect();
        assert_eq!(unification.len(), 1);
        assert_eq!(unification[0].db, "UniProt");
        assert_eq!(unification[0].accession, "P23219");
    }

    #[test]
    fn polypeptides_without_id_get_name_digest_keys() {
        let config = ConvertConfig::default();
        let builder = ProteinBuilder::new(&config);
        let mut report = ConversionReport::default();
        let mut polypeptide = ptgs1();
        polypeptide.id = String::new();
        let a = builder.key(&mut report, "DB00945", &polypeptide);
        let b = builder.key(&mut report, "DB00945", &polypeptide);
        assert_eq!(a, b);
        assert!(a.starts_with("anon-"));
        assert_eq!(report.warnings.len(), 2);
    }
}
