//! Identifier derivation.
//!
//! Every element id is `<role prefix>_<suffix>`. The suffix is either the
//! record's natural key (sanitized) or an FNV-1a digest of the discriminating
//! content. Distinct prefixes per role keep ids of different element kinds
//! from ever colliding.
//!
//! Ids returned here are *local*: [`crate::Model::complete_id`] applies the
//! namespace before elements are stored.

use crate::digest::{fnv1a64_hex, fnv1a64_parts_hex};
use serde::{Deserialize, Serialize};

/// The kind of element an identifier is derived for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    SmallMolecule,
    SmallMoleculeReference,
    ProteinReference,
    Protein,
    ModificationFeature,
    Reaction,
    Control,
    UnificationXref,
    RelationshipXref,
    PublicationXref,
    Vocabulary,
    BioSource,
    ChemicalStructure,
}

impl Role {
    pub fn prefix(self) -> &'static str {
        match self {
            Role::SmallMolecule => "sm",
            Role::SmallMoleculeReference => "smr",
            Role::ProteinReference => "pr",
            Role::Protein => "protein",
            Role::ModificationFeature => "mod",
            Role::Reaction => "rxn",
            Role::Control => "control",
            Role::UnificationXref => "uxref",
            Role::RelationshipXref => "rxref",
            Role::PublicationXref => "pubxref",
            Role::Vocabulary => "vocab",
            Role::BioSource => "biosrc",
            Role::ChemicalStructure => "smiles",
        }
    }
}

/// Replace anything outside `[A-Za-z0-9_-]` so the id stays URI-safe.
pub fn sanitize_id_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            out.push(c);
        } else {
            out.push('_');
        }
    }
    if out.is_empty() {
        "_".to_string()
    } else {
        out
    }
}

/// Natural-key id: `<prefix>_<part>_<part>…`.
///
/// A part that sanitizing alters gets `-<fnv1a64 of the raw part>` appended,
/// so `A.1` and `A_1` stay distinct.
pub fn local_id<S: AsRef<str>>(role: Role, parts: &[S]) -> String {
    let mut out = role.prefix().to_string();
    for part in parts {
        let raw = part.as_ref();
        let clean = sanitize_id_component(raw);
        out.push('_');
        out.push_str(&clean);
        if clean != raw {
            out.push('-');
            out.push_str(&fnv1a64_hex(raw.as_bytes()));
        }
    }
    out
}

/// Content-hash id: `<prefix>_<fnv1a64 of parts>`.
pub fn hashed_id<S: AsRef<str>>(role: Role, parts: &[S]) -> String {
    format!("{}_{}", role.prefix(), fnv1a64_parts_hex(parts))
}

/// Random id for records without any distinguishing content.
///
/// Not reproducible across runs; callers must report the record as degenerate.
pub fn random_id(role: Role) -> String {
    format!("{}_{}", role.prefix(), uuid::Uuid::new_v4().simple())
}
