//! Output elements of the pathway graph.
//!
//! Elements reference each other by id (never by pointer); the owning
//! [`crate::Model`] resolves ids. Collections that behave as sets in the
//! exchange format (`names`, `xrefs`, features) are `BTreeSet`s so iteration
//! and serialization order depend only on content.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ============================================================================
// Shared capabilities
// ============================================================================

/// Display name, standard name and the full set of name variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Names {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub names: BTreeSet<String>,
}

/// Elements that carry names.
pub trait Named {
    fn names(&self) -> &Names;
    fn names_mut(&mut self) -> &mut Names;

    fn display_name(&self) -> Option<&str> {
        self.names().display_name.as_deref()
    }

    /// Add a name variant. Blank names are ignored.
    fn add_name(&mut self, name: &str) {
        let name = name.trim();
        if !name.is_empty() {
            self.names_mut().names.insert(name.to_string());
        }
    }

    /// Set display + standard name and record it as a variant.
    fn set_preferred_name(&mut self, name: &str) {
        let names = self.names_mut();
        names.display_name = Some(name.to_string());
        names.standard_name = Some(name.to_string());
        self.add_name(name);
    }
}

/// Elements that carry cross-references (by xref element id).
pub trait XrefHolder {
    fn xrefs(&self) -> &BTreeSet<String>;
    fn xrefs_mut(&mut self) -> &mut BTreeSet<String>;

    fn add_xref(&mut self, xref_id: &str) {
        self.xrefs_mut().insert(xref_id.to_string());
    }
}

macro_rules! impl_named {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Named for $ty {
                fn names(&self) -> &Names {
                    &self.names
                }
                fn names_mut(&mut self) -> &mut Names {
                    &mut self.names
                }
            }
        )+
    };
}

macro_rules! impl_xref_holder {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl XrefHolder for $ty {
                fn xrefs(&self) -> &BTreeSet<String> {
                    &self.xrefs
                }
                fn xrefs_mut(&mut self) -> &mut BTreeSet<String> {
                    &mut self.xrefs
                }
            }
        )+
    };
}

// ============================================================================
// Vocabulary enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlType {
    Activation,
    Inhibition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversionDirection {
    #[default]
    LeftToRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StructureFormat {
    #[default]
    Smiles,
}

// ============================================================================
// Element structs
// ============================================================================

/// A drug as a chemical species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmallMolecule {
    pub id: String,
    #[serde(flatten)]
    pub names: Names,
    pub entity_reference: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
}

/// Canonical chemical description shared by molecule instances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmallMoleculeReference {
    pub id: String,
    #[serde(flatten)]
    pub names: Names,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub xrefs: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chemical_formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub molecular_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<String>,
}

/// A polypeptide in one state (active, inactive, acetylated, unmodified).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Protein {
    pub id: String,
    #[serde(flatten)]
    pub names: Names,
    pub entity_reference: String,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub features: BTreeSet<String>,
}

/// State-independent identity of a polypeptide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProteinReference {
    pub id: String,
    #[serde(flatten)]
    pub names: Names,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub xrefs: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organism: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub entity_features: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModificationFeature {
    pub id: String,
    pub modification_type: String,
}

/// Directed conversion between two protein variants. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiochemicalReaction {
    pub id: String,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub conversion_direction: ConversionDirection,
}

/// A molecule regulating one or more reactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub id: String,
    #[serde(flatten)]
    pub names: Names,
    pub controllers: Vec<String>,
    pub controlled: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_type: Option<ControlType>,
}

/// `(db, accession)` pair. Used by both unification and relationship xrefs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Xref {
    pub id: String,
    pub db: String,
    pub accession: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationXref {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accession: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub urls: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub sources: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceModificationVocabulary {
    pub id: String,
    pub terms: BTreeSet<String>,
}

/// Source organism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BioSource {
    pub id: String,
    #[serde(flatten)]
    pub names: Names,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChemicalStructure {
    pub id: String,
    pub structure_format: StructureFormat,
    pub structure_data: String,
}

impl_named!(
    SmallMolecule,
    SmallMoleculeReference,
    Protein,
    ProteinReference,
    Control,
    BioSource,
);

impl_xref_holder!(SmallMoleculeReference, ProteinReference);

// ============================================================================
// Element enum
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementKind {
    SmallMolecule,
    SmallMoleculeReference,
    Protein,
    ProteinReference,
    ModificationFeature,
    BiochemicalReaction,
    Control,
    UnificationXref,
    RelationshipXref,
    PublicationXref,
    SequenceModificationVocabulary,
    BioSource,
    ChemicalStructure,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::SmallMolecule => "SmallMolecule",
            ElementKind::SmallMoleculeReference => "SmallMoleculeReference",
            ElementKind::Protein => "Protein",
            ElementKind::ProteinReference => "ProteinReference",
            ElementKind::ModificationFeature => "ModificationFeature",
            ElementKind::BiochemicalReaction => "BiochemicalReaction",
            ElementKind::Control => "Control",
            ElementKind::UnificationXref => "UnificationXref",
            ElementKind::RelationshipXref => "RelationshipXref",
            ElementKind::PublicationXref => "PublicationXref",
            ElementKind::SequenceModificationVocabulary => "SequenceModificationVocabulary",
            ElementKind::BioSource => "BioSource",
            ElementKind::ChemicalStructure => "ChemicalStructure",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any element stored in the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Element {
    SmallMolecule(SmallMolecule),
    SmallMoleculeReference(SmallMoleculeReference),
    Protein(Protein),
    ProteinReference(ProteinReference),
    ModificationFeature(ModificationFeature),
    BiochemicalReaction(BiochemicalReaction),
    Control(Control),
    UnificationXref(Xref),
    RelationshipXref(Xref),
    PublicationXref(PublicationXref),
    SequenceModificationVocabulary(SequenceModificationVocabulary),
    BioSource(BioSource),
    ChemicalStructure(ChemicalStructure),
}

impl Element {
    pub fn id(&self) -> &str {
        match self {
            Element::SmallMolecule(e) => &e.id,
            Element::SmallMoleculeReference(e) => &e.id,
            Element::Protein(e) => &e.id,
            Element::ProteinReference(e) => &e.id,
            Element::ModificationFeature(e) => &e.id,
            Element::BiochemicalReaction(e) => &e.id,
            Element::Control(e) => &e.id,
            Element::UnificationXref(e) | Element::RelationshipXref(e) => &e.id,
            Element::PublicationXref(e) => &e.id,
            Element::SequenceModificationVocabulary(e) => &e.id,
            Element::BioSource(e) => &e.id,
            Element::ChemicalStructure(e) => &e.id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::SmallMolecule(_) => ElementKind::SmallMolecule,
            Element::SmallMoleculeReference(_) => ElementKind::SmallMoleculeReference,
            Element::Protein(_) => ElementKind::Protein,
            Element::ProteinReference(_) => ElementKind::ProteinReference,
            Element::ModificationFeature(_) => ElementKind::ModificationFeature,
            Element::BiochemicalReaction(_) => ElementKind::BiochemicalReaction,
            Element::Control(_) => ElementKind::Control,
            Element::UnificationXref(_) => ElementKind::UnificationXref,
            Element::RelationshipXref(_) => ElementKind::RelationshipXref,
            Element::PublicationXref(_) => ElementKind::PublicationXref,
            Element::SequenceModificationVocabulary(_) => {
                ElementKind::SequenceModificationVocabulary
            }
            Element::BioSource(_) => ElementKind::BioSource,
            Element::ChemicalStructure(_) => ElementKind::ChemicalStructure,
        }
    }

    /// Named view, for kinds that carry names.
    pub fn as_named(&self) -> Option<&dyn Named> {
        match self {
            Element::SmallMolecule(e) => Some(e),
            Element::SmallMoleculeReference(e) => Some(e),
            Element::Protein(e) => Some(e),
            Element::ProteinReference(e) => Some(e),
            Element::Control(e) => Some(e),
            Element::BioSource(e) => Some(e),
            _ => None,
        }
    }

    /// The `(db, accession)` payload of unification/relationship xrefs.
    pub fn as_xref(&self) -> Option<&Xref> {
        match self {
            Element::UnificationXref(x) | Element::RelationshipXref(x) => Some(x),
            _ => None,
        }
    }
}

/// Typed access to one [`Element`] variant.
pub trait ElementVariant: Sized {
    const KIND: ElementKind;

    fn from_element(element: &Element) -> Option<&Self>;
    fn from_element_mut(element: &mut Element) -> Option<&mut Self>;
    fn into_element(self) -> Element;
}

macro_rules! element_variant {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl ElementVariant for $ty {
                const KIND: ElementKind = ElementKind::$ty;

                fn from_element(element: &Element) -> Option<&Self> {
                    match element {
                        Element::$ty(e) => Some(e),
                        _ => None,
                    }
                }

                fn from_element_mut(element: &mut Element) -> Option<&mut Self> {
                    match element {
                        Element::$ty(e) => Some(e),
                        _ => None,
                    }
                }

                fn into_element(self) -> Element {
                    Element::$ty(self)
                }
            }
        )+
    };
}

element_variant!(
    SmallMolecule,
    SmallMoleculeReference,
    Protein,
    ProteinReference,
    ModificationFeature,
    BiochemicalReaction,
    Control,
    PublicationXref,
    SequenceModificationVocabulary,
    BioSource,
    ChemicalStructure,
);
