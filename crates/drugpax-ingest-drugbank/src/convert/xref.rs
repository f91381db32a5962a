//! Cross-reference interning.
//!
//! Unification and relationship xrefs are keyed by a digest of the
//! *normalized* database name plus the accession, so the same external record
//! cited from several drugs or proteins is stored once. Publication xrefs are
//! keyed by PubMed id / ISBN (as registry URIs) or by a digest of the URL or
//! citation.

use crate::record::{Article, Link, Textbook};
use drugpax_model::{
    hashed_id, Element, ElementKind, Model, ModelError, PublicationXref, Role, Xref,
};

/// Known spellings of database names, matched case-insensitively.
const DB_ALIASES: [(&str, &str); 4] = [
    ("uniprot accession", "UniProt"),
    ("uniprotkb", "UniProt"),
    ("uniprot knowledgebase", "UniProt"),
    ("uniprot", "UniProt"),
];

const BIOREGISTRY: &str = "https://bioregistry.io/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XrefKind {
    /// Asserts identity with the external record.
    Unification,
    /// Looser association.
    Relationship,
}

impl XrefKind {
    fn role(self) -> Role {
        match self {
            XrefKind::Unification => Role::UnificationXref,
            XrefKind::Relationship => Role::RelationshipXref,
        }
    }

    fn element_kind(self) -> ElementKind {
        match self {
            XrefKind::Unification => ElementKind::UnificationXref,
            XrefKind::Relationship => ElementKind::RelationshipXref,
        }
    }
}

/// Canonical database name for `db`.
pub fn normalize_db(db: &str) -> String {
    let db = db.trim();
    DB_ALIASES
        .iter()
        .find(|(alias, _)| db.eq_ignore_ascii_case(alias))
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| db.to_string())
}

/// Intern a unification/relationship xref and return its id.
///
/// The accession is stored verbatim.
pub fn resolve(
    model: &mut Model,
    kind: XrefKind,
    accession: &str,
    db: &str,
) -> Result<String, ModelError> {
    let db = normalize_db(db);
    let local = hashed_id(kind.role(), &[db.as_str(), accession]);
    let interned = model.get_or_create(kind.element_kind(), &local, |_, id| {
        let xref = Xref {
            id: id.to_string(),
            db,
            accession: accession.to_string(),
        };
        Ok(match kind {
            XrefKind::Unification => Element::UnificationXref(xref),
            XrefKind::Relationship => Element::RelationshipXref(xref),
        })
    })?;
    Ok(interned.id)
}

fn publication(
    model: &mut Model,
    local: &str,
    build: impl FnOnce(&str) -> PublicationXref,
) -> Result<String, ModelError> {
    let interned = model.get_or_create(ElementKind::PublicationXref, local, |_, id| {
        Ok(Element::PublicationXref(build(id)))
    })?;
    Ok(interned.id)
}

/// PubMed citation. `None` when the article has neither a PubMed id nor a citation.
pub fn resolve_article(model: &mut Model, article: &Article) -> Result<Option<String>, ModelError> {
    let pmid = article.pubmed_id.trim();
    let citation = article.citation.trim();
    let comments = if citation.is_empty() {
        Vec::new()
    } else {
        vec![citation.to_string()]
    };

    if !pmid.is_empty() {
        let uri = format!("{BIOREGISTRY}pubmed:{pmid}");
        let id = publication(model, &uri, |id| PublicationXref {
            id: id.to_string(),
            db: Some("pubmed".to_string()),
            accession: Some(pmid.to_string()),
            urls: [uri.clone()].into(),
            comments,
            ..Default::default()
        })?;
        return Ok(Some(id));
    }
    if citation.is_empty() {
        return Ok(None);
    }
    let local = hashed_id(Role::PublicationXref, &["article", citation]);
    publication(model, &local, |id| PublicationXref {
        id: id.to_string(),
        comments,
        ..Default::default()
    })
    .map(Some)
}

/// Web link, keyed by URL. A title other than the placeholder "link" becomes the source.
pub fn resolve_link(model: &mut Model, link: &Link) -> Result<Option<String>, ModelError> {
    let url = link.url.trim();
    if url.is_empty() {
        return Ok(None);
    }
    let title = link.title.trim();
    let local = hashed_id(Role::PublicationXref, &["link", url]);
    publication(model, &local, |id| {
        let mut xref = PublicationXref {
            id: id.to_string(),
            urls: [url.to_string()].into(),
            ..Default::default()
        };
        if !title.is_empty() && !title.eq_ignore_ascii_case("link") {
            xref.sources.insert(title.to_string());
        }
        xref
    })
    .map(Some)
}

/// Textbook, keyed by ISBN (falls back to the citation text).
pub fn resolve_textbook(
    model: &mut Model,
    textbook: &Textbook,
) -> Result<Option<String>, ModelError> {
    let isbn = textbook.isbn.trim();
    let citation = textbook.citation.trim();
    let comments = if citation.is_empty() {
        Vec::new()
    } else {
        vec![citation.to_string()]
    };

    if !isbn.is_empty() {
        let uri = format!("{BIOREGISTRY}isbn:{isbn}");
        let id = publication(model, &uri, |id| PublicationXref {
            id: id.to_string(),
            db: Some("isbn".to_string()),
            accession: Some(isbn.to_string()),
            urls: [uri.clone()].into(),
            comments,
            ..Default::default()
        })?;
        return Ok(Some(id));
    }
    if citation.is_empty() {
        return Ok(None);
    }
    let local = hashed_id(Role::PublicationXref, &["textbook", citation]);
    publication(model, &local, |id| PublicationXref {
        id: id.to_string(),
        comments,
        ..Default::default()
    })
    .map(Some)
}
