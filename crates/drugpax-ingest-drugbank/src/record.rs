//! Typed DrugBank records consumed by the converter.
//!
//! These are plain owned values: the XML decoder fills them, tests build them
//! directly. Optional substructures are empty collections, never `None`.

/// One `<drugbank-id>`; at most one per drug is flagged primary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrugId {
    pub value: String,
    pub primary: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalIdentifier {
    pub resource: String,
    pub identifier: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperimentalProperty {
    pub kind: Option<String>,
    pub value: String,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Article {
    pub pubmed_id: String,
    pub citation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Link {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Textbook {
    pub isbn: String,
    pub citation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneralReferences {
    pub articles: Vec<Article>,
    pub links: Vec<Link>,
    pub textbooks: Vec<Textbook>,
}

/// Whether the drug's action on the target is established.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KnownAction {
    Yes,
    No,
    #[default]
    Unknown,
}

impl KnownAction {
    /// Case-insensitive; anything other than yes/no is `Unknown`.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.eq_ignore_ascii_case("yes") {
            KnownAction::Yes
        } else if text.eq_ignore_ascii_case("no") {
            KnownAction::No
        } else {
            KnownAction::Unknown
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Polypeptide {
    pub id: String,
    pub source: Option<String>,
    pub name: String,
    pub gene_name: Option<String>,
    pub organism: Option<String>,
    pub synonyms: Vec<String>,
    pub external_identifiers: Vec<ExternalIdentifier>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Target {
    pub id: Option<String>,
    pub name: Option<String>,
    pub polypeptides: Vec<Polypeptide>,
    /// Free-text action verbs, in source order.
    pub actions: Vec<String>,
    pub known_action: KnownAction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Drug {
    pub ids: Vec<DrugId>,
    pub name: String,
    pub description: String,
    pub synonyms: Vec<String>,
    pub brands: Vec<String>,
    pub general_references: GeneralReferences,
    pub experimental_properties: Vec<ExperimentalProperty>,
    pub external_identifiers: Vec<ExternalIdentifier>,
    pub targets: Vec<Target>,
}

impl Drug {
    /// The first id flagged primary.
    pub fn primary_id(&self) -> Option<&str> {
        self.ids
            .iter()
            .find(|id| id.primary && !id.value.trim().is_empty())
            .map(|id| id.value.trim())
    }
}
