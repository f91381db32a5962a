//! The output collection: every element, keyed by full identifier.

use crate::element::{Element, ElementKind, ElementVariant};
use std::collections::BTreeMap;
use thiserror::Error;

/// Registry hosts whose URIs are already globally qualified.
const REGISTRY_HOSTS: [&str; 2] = ["identifiers.org/", "bioregistry.io/"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("element `{0}` already exists")]
    DuplicateId(String),
    #[error("element `{id}` is a {found}, expected a {expected}")]
    KindMismatch {
        id: String,
        expected: ElementKind,
        found: ElementKind,
    },
    #[error("no element with id `{0}`")]
    UnknownId(String),
    #[error("builder for `{expected}` produced an element with id `{found}`")]
    IdMismatch { expected: String, found: String },
}

/// Result of [`Model::get_or_create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interned {
    pub id: String,
    /// `true` when this call ran the builder.
    pub created: bool,
}

/// Owned collection of pathway elements under one namespace.
///
/// Iteration is in identifier order, so two models built from the same input
/// iterate (and serialize) identically.
#[derive(Debug, Clone, Default)]
pub struct Model {
    xml_base: String,
    elements: BTreeMap<String, Element>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty model whose ids are prefixed with `xml_base`.
    pub fn with_xml_base(xml_base: impl Into<String>) -> Self {
        Self {
            xml_base: xml_base.into(),
            elements: BTreeMap::new(),
        }
    }

    pub fn xml_base(&self) -> &str {
        &self.xml_base
    }

    /// Apply the namespace to a locally derived id.
    ///
    /// Registry URIs (identifiers.org, bioregistry.io) are returned unchanged.
    pub fn complete_id(&self, local_id: &str) -> String {
        if REGISTRY_HOSTS.iter().any(|host| local_id.contains(host)) {
            local_id.to_string()
        } else {
            format!("{}{}", self.xml_base, local_id)
        }
    }

    /// Insert an element. Its id must already be complete.
    pub fn add(&mut self, element: Element) -> Result<(), ModelError> {
        let id = element.id().to_string();
        if self.elements.contains_key(&id) {
            return Err(ModelError::DuplicateId(id));
        }
        self.elements.insert(id, element);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    /// Typed lookup.
    pub fn get_as<T: ElementVariant>(&self, id: &str) -> Result<&T, ModelError> {
        let element = self
            .elements
            .get(id)
            .ok_or_else(|| ModelError::UnknownId(id.to_string()))?;
        let found = element.kind();
        T::from_element(element).ok_or_else(|| ModelError::KindMismatch {
            id: id.to_string(),
            expected: T::KIND,
            found,
        })
    }

    /// Typed mutable lookup.
    pub fn get_as_mut<T: ElementVariant>(&mut self, id: &str) -> Result<&mut T, ModelError> {
        let element = self
            .elements
            .get_mut(id)
            .ok_or_else(|| ModelError::UnknownId(id.to_string()))?;
        let found = element.kind();
        T::from_element_mut(element).ok_or(ModelError::KindMismatch {
            id: id.to_string(),
            expected: T::KIND,
            found,
        })
    }

    /// Create-or-fetch.
    ///
    /// `local_id` is completed with the namespace. If an element already lives
    /// under that id it must be of `kind`, and `build` is not called.
    /// Otherwise `build` runs exactly once with the full id; it may intern
    /// other elements into the model before returning the new one.
    pub fn get_or_create<F>(
        &mut self,
        kind: ElementKind,
        local_id: &str,
        build: F,
    ) -> Result<Interned, ModelError>
    where
        F: FnOnce(&mut Model, &str) -> Result<Element, ModelError>,
    {
        let id = self.complete_id(local_id);
        if let Some(existing) = self.elements.get(&id) {
            if existing.kind() != kind {
                return Err(ModelError::KindMismatch {
                    id,
                    expected: kind,
                    found: existing.kind(),
                });
            }
            return Ok(Interned { id, created: false });
        }

        let element = build(self, &id)?;
        if element.id() != id {
            return Err(ModelError::IdMismatch {
                expected: id,
                found: element.id().to_string(),
            });
        }
        if element.kind() != kind {
            return Err(ModelError::KindMismatch {
                id,
                expected: kind,
                found: element.kind(),
            });
        }
        self.add(element)?;
        Ok(Interned { id, created: true })
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All elements in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// All ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }

    /// Elements of one variant, in id order.
    pub fn elements_of<'a, T: ElementVariant + 'a>(&'a self) -> impl Iterator<Item = &'a T> {
        self.elements.values().filter_map(T::from_element)
    }

    /// Count of elements per kind.
    pub fn summary(&self) -> BTreeMap<ElementKind, usize> {
        let mut counts = BTreeMap::new();
        for element in self.elements.values() {
            *counts.entry(element.kind()).or_insert(0) += 1;
        }
        counts
    }
}
