//! Declarative property paths and the flattening rules behind every field
//!
//! A [`FieldSpec`] names an output column and says how to reach its values
//! from a subject. All entity tables are plain arrays of these; the
//! traversal lives here once.
//!
//! Flattening rules:
//! - every value reached is stringified (IRI text, blank node label, or
//!   literal lexical form) and the strings are joined with `|` in store order
//! - nothing reached gives the empty string
//! - a multi-hop path visits every intermediate node and concatenates what
//!   it finds, so nesting never multiplies rows
//! - a language filter keeps only literals carrying exactly that tag

use std::borrow::Cow;

use oxrdf::{NamedNodeRef, NamedOrBlankNodeRef, Term};

use crate::store::{as_subject, GraphStore};
use crate::vocab::VALUE_SEPARATOR;

/// Predicate chain from a subject to the values of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyPath {
    /// First predicate, applied to the subject itself
    pub head: &'static str,
    /// Further predicates, each applied to the nodes reached so far
    pub tail: &'static [&'static str],
    /// Required language tag of the final values
    pub language: Option<&'static str>,
}

/// How a field obtains its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    /// Multi-valued path, all values joined
    Path(PropertyPath),
    /// Single-valued link: the first object of `predicate` (store order)
    /// that has `rdf:type` `target_type`
    Link {
        predicate: &'static str,
        target_type: &'static str,
    },
}

/// One output column of an entity table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub accessor: Accessor,
}

impl FieldSpec {
    /// `subject predicate ?value`
    pub const fn direct(name: &'static str, predicate: &'static str) -> Self {
        Self {
            name,
            accessor: Accessor::Path(PropertyPath {
                head: predicate,
                tail: &[],
                language: None,
            }),
        }
    }

    /// `subject predicate ?value` where `?value` is tagged `tag`
    pub const fn language(name: &'static str, predicate: &'static str, tag: &'static str) -> Self {
        Self {
            name,
            accessor: Accessor::Path(PropertyPath {
                head: predicate,
                tail: &[],
                language: Some(tag),
            }),
        }
    }

    /// `subject head ?n1 . ?n1 tail[0] ?n2 ...`
    pub const fn nested(
        name: &'static str,
        head: &'static str,
        tail: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            accessor: Accessor::Path(PropertyPath {
                head,
                tail,
                language: None,
            }),
        }
    }

    /// First object of `predicate` typed `target_type`
    pub const fn link(
        name: &'static str,
        predicate: &'static str,
        target_type: &'static str,
    ) -> Self {
        Self {
            name,
            accessor: Accessor::Link {
                predicate,
                target_type,
            },
        }
    }
}

fn iri(value: &'static str) -> NamedNodeRef<'static> {
    NamedNodeRef::new_unchecked(value)
}

/// Every value reached from `subject` along `path`, in store order
pub fn collect_path<'a>(
    store: &'a GraphStore,
    subject: NamedOrBlankNodeRef<'_>,
    path: &PropertyPath,
) -> Vec<&'a Term> {
    let mut values: Vec<&'a Term> = store.objects(subject, iri(path.head)).collect();

    for &predicate in path.tail {
        values = values
            .into_iter()
            .filter_map(as_subject)
            .flat_map(|node| store.objects(node, iri(predicate)))
            .collect();
    }

    if let Some(tag) = path.language {
        values.retain(|value| has_language(value, tag));
    }

    values
}

/// Whether a term is a literal tagged `tag`
///
/// Untagged literals, IRIs and blank nodes never match. RDF parsers hand
/// tags over in lower case, so the comparison ignores ASCII case; otherwise
/// the tag must match in full (`ja` does not match `ja-Hrkt`).
pub fn has_language(term: &Term, tag: &str) -> bool {
    match term {
        Term::Literal(literal) => literal
            .language()
            .is_some_and(|language| language.eq_ignore_ascii_case(tag)),
        _ => false,
    }
}

/// Resolve a single-valued typed link
pub fn resolve_link<'a>(
    store: &'a GraphStore,
    subject: NamedOrBlankNodeRef<'_>,
    predicate: &'static str,
    target_type: &'static str,
) -> Option<&'a Term> {
    store.objects(subject, iri(predicate)).find(|candidate| {
        as_subject(candidate).is_some_and(|node| store.has_type(node, iri(target_type)))
    })
}

/// String form of a term as written to a cell
pub fn term_value(term: &Term) -> Cow<'_, str> {
    match term {
        Term::NamedNode(node) => Cow::Borrowed(node.as_str()),
        Term::BlankNode(node) => Cow::Borrowed(node.as_str()),
        Term::Literal(literal) => Cow::Borrowed(literal.value()),
    }
}

/// String form of a subject as written to a key column
pub fn subject_value(subject: NamedOrBlankNodeRef<'_>) -> &str {
    match subject {
        NamedOrBlankNodeRef::NamedNode(node) => node.as_str(),
        NamedOrBlankNodeRef::BlankNode(node) => node.as_str(),
    }
}

/// Join values with the multi-value separator
pub fn join_values(values: &[&Term]) -> String {
    values
        .iter()
        .map(|value| term_value(value))
        .collect::<Vec<_>>()
        .join(VALUE_SEPARATOR)
}

/// Cell value of one field
///
/// A missing subject (a failed join) yields the empty string for every
/// field.
pub fn field_value(
    store: &GraphStore,
    subject: Option<NamedOrBlankNodeRef<'_>>,
    spec: &FieldSpec,
) -> String {
    let Some(subject) = subject else {
        return String::new();
    };

    match spec.accessor {
        Accessor::Path(path) => join_values(&collect_path(store, subject, &path)),
        Accessor::Link {
            predicate,
            target_type,
        } => resolve_link(store, subject, predicate, target_type)
            .map(|target| term_value(target).into_owned())
            .unwrap_or_default(),
    }
}

/// Append the cell values of `fields` for `subject` to `row`
pub fn project(
    store: &GraphStore,
    subject: Option<NamedOrBlankNodeRef<'_>>,
    fields: &[FieldSpec],
    row: &mut Vec<String>,
) {
    row.extend(fields.iter().map(|spec| field_value(store, subject, spec)));
}
