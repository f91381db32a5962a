//! drugpax pathway model
//!
//! In-memory graph of pathway elements produced by the drug converters:
//!
//! - **Elements** (`element`): molecules, proteins, reactions, controls,
//!   cross-references, vocabularies, organisms, chemical structures.
//! - **Model** (`model`): the single owner of all elements, keyed by full id,
//!   with create-or-fetch interning.
//! - **Identifiers** (`ids`, `digest`): role-tagged, content-derived ids.
//! - **Export** (`export`): deterministic JSON snapshots.
//!
//! The model carries its namespace (`xml_base`) explicitly; there is no
//! process-wide factory, so independent conversions can coexist.

pub mod digest;
pub mod element;
pub mod export;
pub mod ids;
pub mod model;

pub use element::{
    BioSource, BiochemicalReaction, ChemicalStructure, Control, ControlType, ConversionDirection,
    Element, ElementKind, ElementVariant, ModificationFeature, Named, Names, Protein,
    ProteinReference, PublicationXref, SequenceModificationVocabulary, SmallMolecule,
    SmallMoleculeReference, StructureFormat, Xref, XrefHolder,
};
pub use ids::{hashed_id, local_id, random_id, Role};
pub use model::{Interned, Model, ModelError};
