//! In-memory triple store for the merged collection graph
//!
//! Triples keep the order in which they were first asserted. Merging two
//! stores is a set union: a triple already present keeps its original
//! position and the duplicate is dropped, so every query below is
//! deterministic for identical input.

use std::collections::{HashMap, HashSet};

use oxrdf::vocab::rdf;
use oxrdf::{NamedNode, NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef, Term, TermRef, Triple};

/// Queryable collection of triples with namespace bookkeeping
#[derive(Debug, Default, Clone)]
pub struct GraphStore {
    /// All triples in assertion order
    triples: Vec<Triple>,
    /// Membership set backing the union semantics
    seen: HashSet<Triple>,
    /// Positions in `triples` by subject
    by_subject: HashMap<NamedOrBlankNode, Vec<usize>>,
    /// Positions in `triples` by predicate
    by_predicate: HashMap<NamedNode, Vec<usize>>,
    /// Bound prefixes, first binding of a prefix wins
    namespaces: Vec<(String, String)>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Add a triple, returning `false` when it was already present
    pub fn insert(&mut self, triple: Triple) -> bool {
        if self.seen.contains(&triple) {
            return false;
        }

        let position = self.triples.len();
        self.by_subject
            .entry(triple.subject.clone())
            .or_default()
            .push(position);
        self.by_predicate
            .entry(triple.predicate.clone())
            .or_default()
            .push(position);
        self.seen.insert(triple.clone());
        self.triples.push(triple);
        true
    }

    /// Bind a namespace prefix
    ///
    /// A prefix that is already bound keeps its first IRI.
    pub fn bind_namespace(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        let prefix = prefix.into();
        let iri = iri.into();
        if self.namespaces.iter().any(|(p, _)| *p == prefix) {
            return;
        }
        self.namespaces.push((prefix, iri));
    }

    /// Union another store into this one
    ///
    /// Returns the number of triples that were new to this store.
    pub fn merge(&mut self, other: GraphStore) -> usize {
        let mut added = 0;
        for triple in other.triples {
            if self.insert(triple) {
                added += 1;
            }
        }
        for (prefix, iri) in other.namespaces {
            self.bind_namespace(prefix, iri);
        }
        added
    }

    /// All subjects `S` such that `(S, rdf:type, type_iri)` is in the store
    pub fn subjects_of_type(&self, type_iri: NamedNodeRef<'_>) -> Vec<NamedOrBlankNodeRef<'_>> {
        let Some(positions) = self.by_predicate.get(&rdf::TYPE.into_owned()) else {
            return Vec::new();
        };

        positions
            .iter()
            .filter_map(|&i| self.triples.get(i))
            .filter(|t| t.object.as_ref() == TermRef::NamedNode(type_iri))
            .map(|t| t.subject.as_ref())
            .collect()
    }

    /// All objects `O` such that `(subject, predicate, O)` is in the store
    pub fn objects<'a>(
        &'a self,
        subject: NamedOrBlankNodeRef<'_>,
        predicate: NamedNodeRef<'a>,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        self.by_subject
            .get(&subject.into_owned())
            .into_iter()
            .flatten()
            .filter_map(|&i| self.triples.get(i))
            .filter(move |t| t.predicate.as_ref() == predicate)
            .map(|t| &t.object)
    }

    /// Existence check for a single triple
    pub fn has_triple(
        &self,
        subject: NamedOrBlankNodeRef<'_>,
        predicate: NamedNodeRef<'_>,
        object: TermRef<'_>,
    ) -> bool {
        let triple = Triple::new(subject.into_owned(), predicate.into_owned(), object.into_owned());
        self.seen.contains(&triple)
    }

    /// Shorthand for `has_triple(subject, rdf:type, type_iri)`
    pub fn has_type(&self, subject: NamedOrBlankNodeRef<'_>, type_iri: NamedNodeRef<'_>) -> bool {
        self.has_triple(subject, rdf::TYPE, type_iri.into())
    }

    /// Bound namespace prefixes in binding order
    pub fn namespaces(&self) -> &[(String, String)] {
        &self.namespaces
    }

    /// Iterate all triples in store order
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }
}

/// View an object term as a node that can itself be queried as a subject
///
/// Literals are dead ends for path traversal and yield `None`.
pub fn as_subject(term: &Term) -> Option<NamedOrBlankNodeRef<'_>> {
    match term {
        Term::NamedNode(node) => Some(node.as_ref().into()),
        Term::BlankNode(node) => Some(node.as_ref().into()),
        Term::Literal(_) => None,
    }
}
