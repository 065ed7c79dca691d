//! IRI classification and expansion for JSON-LD documents
//!
//! Holds the active context of a JSON-LD document (prefixes, term
//! definitions, `@vocab`, `@base`, default `@language`) and turns the
//! identifiers found in a document into absolute IRIs or blank node labels.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::vocab::{SCHEMA, SCHEMA_ORG_CONTEXTS};

/// Classification of an identifier string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdKind {
    /// JSON-LD keyword: "@id", "@type", ...
    Keyword,
    /// Blank node label: "_:b0"
    BlankNode,
    /// Compact IRI whose prefix is a defined term: "schema:name"
    Compact,
    /// Absolute IRI: "https://...", "urn:..."
    Absolute,
    /// A defined term: "name" with "name" in the context
    Term,
    /// Anything else; resolved against `@vocab` or `@base`
    Relative,
}

/// Result of expanding an identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expanded {
    Iri(String),
    Blank(String),
}

/// How string values of a term are interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coercion {
    /// `"@type": "@id"`
    Id,
    /// `"@type": "@vocab"`
    Vocab,
    /// `"@type": "<datatype IRI>"`
    Datatype(String),
}

/// A resolved term definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermDefinition {
    pub iri: String,
    pub coercion: Option<Coercion>,
    /// `Some(None)` when the term explicitly resets the language
    pub language: Option<Option<String>>,
}

/// Expanded term definition as written in a context
#[derive(Debug, Deserialize)]
struct RawTermDefinition {
    #[serde(rename = "@id")]
    id: Option<String>,
    #[serde(rename = "@type")]
    coercion: Option<String>,
    #[serde(rename = "@language")]
    language: Option<Value>,
}

/// Active context of a JSON-LD document
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub base: Option<Url>,
    pub vocab: Option<String>,
    pub language: Option<String>,
    pub terms: HashMap<String, TermDefinition>,
}

impl Context {
    /// Context for a document located at `base_iri`
    pub fn with_base(base_iri: Option<&str>) -> Self {
        Self {
            base: base_iri.and_then(|b| Url::parse(b).ok()),
            ..Self::default()
        }
    }

    /// Apply a local `@context` value, returning the new active context
    ///
    /// Remote contexts are not fetched. The schema.org context URL is
    /// understood as a `@vocab` of schema.org; other URLs are ignored.
    pub fn apply(&self, local: &Value) -> Result<Context, String> {
        let mut context = self.clone();
        match local {
            Value::Null => {
                return Ok(Context {
                    base: self.base.clone(),
                    ..Context::default()
                })
            }
            Value::String(url) => {
                if SCHEMA_ORG_CONTEXTS.contains(&url.as_str()) {
                    context.vocab = Some(SCHEMA.to_string());
                }
            }
            Value::Array(items) => {
                for item in items {
                    context = context.apply(item)?;
                }
            }
            Value::Object(obj) => context.apply_object(obj)?,
            other => return Err(format!("invalid @context: {}", other)),
        }
        Ok(context)
    }

    fn apply_object(&mut self, obj: &serde_json::Map<String, Value>) -> Result<(), String> {
        if let Some(base) = obj.get("@base") {
            self.base = match base {
                Value::String(b) => Some(
                    self.resolve(b)
                        .ok_or_else(|| format!("invalid @base: {}", b))?,
                ),
                _ => None,
            };
        }
        if let Some(vocab) = obj.get("@vocab") {
            self.vocab = match vocab {
                Value::String(v) => Some(
                    self.expand(v, true)
                        .and_then(into_iri)
                        .unwrap_or_else(|| v.clone()),
                ),
                _ => None,
            };
        }
        if let Some(language) = obj.get("@language") {
            self.language = language.as_str().map(str::to_string);
        }

        // Definitions may use prefixes defined later in the same object
        let mut pending: Vec<(&String, &Value)> = obj
            .iter()
            .filter(|(k, _)| !k.starts_with('@'))
            .collect();
        loop {
            let before = pending.len();
            let waiting: HashSet<&str> = pending.iter().map(|&(term, _)| term.as_str()).collect();
            let mut unresolved = Vec::new();
            for (term, definition) in pending {
                match self.define(term, definition, &waiting)? {
                    Some(resolved) => {
                        self.terms.insert(term.clone(), resolved);
                    }
                    None => unresolved.push((term, definition)),
                }
            }
            pending = unresolved;
            if pending.is_empty() || pending.len() == before {
                break;
            }
        }

        Ok(())
    }

    /// Resolve one term definition against the current context
    ///
    /// Returns `Ok(None)` when its IRI cannot be expanded yet, including
    /// when it uses a prefix listed in `waiting` that this object has not
    /// defined so far.
    fn define(
        &self,
        term: &str,
        definition: &Value,
        waiting: &HashSet<&str>,
    ) -> Result<Option<TermDefinition>, String> {
        let depends_on_waiting = |id: &str| {
            compact_prefix(id).is_some_and(|prefix| prefix != term && waiting.contains(prefix))
        };

        match definition {
            Value::String(iri) => {
                if depends_on_waiting(iri) {
                    return Ok(None);
                }
                Ok(self
                    .expand(iri, true)
                    .and_then(into_iri)
                    .map(|iri| TermDefinition {
                        iri,
                        coercion: None,
                        language: None,
                    }))
            }
            Value::Object(_) => {
                let raw: RawTermDefinition = serde_json::from_value(definition.clone())
                    .map_err(|e| format!("invalid definition for '{}': {}", term, e))?;
                let id = raw.id.as_deref().unwrap_or(term);
                let datatype = raw
                    .coercion
                    .as_deref()
                    .filter(|c| !c.starts_with('@'));
                if depends_on_waiting(id) || datatype.is_some_and(depends_on_waiting) {
                    return Ok(None);
                }
                let Some(iri) = self.expand(id, true).and_then(into_iri) else {
                    return Ok(None);
                };
                let coercion = match raw.coercion.as_deref() {
                    None => None,
                    Some("@id") => Some(Coercion::Id),
                    Some("@vocab") => Some(Coercion::Vocab),
                    Some(datatype) => self
                        .expand(datatype, true)
                        .and_then(into_iri)
                        .map(Coercion::Datatype),
                };
                let language = raw.language.map(|l| l.as_str().map(str::to_string));
                Ok(Some(TermDefinition {
                    iri,
                    coercion,
                    language,
                }))
            }
            // A null definition removes the term
            _ => Ok(None),
        }
    }

    /// Classify an identifier in this context
    pub fn classify(&self, id: &str) -> IdKind {
        classify_id(id, |prefix| self.terms.contains_key(prefix))
    }

    /// Expand an identifier
    ///
    /// Vocabulary-relative positions (property keys, `@type` values,
    /// `@vocab`-coerced values) use term definitions and `@vocab`; document
    /// relative positions (`@id` values) resolve against `@base`.
    pub fn expand(&self, id: &str, vocab_relative: bool) -> Option<Expanded> {
        match self.classify(id) {
            IdKind::Keyword => None,
            IdKind::BlankNode => Some(Expanded::Blank(id.trim_start_matches("_:").to_string())),
            IdKind::Compact => {
                let (prefix, suffix) = id.split_once(':')?;
                let term = self.terms.get(prefix)?;
                Some(Expanded::Iri(format!("{}{}", term.iri, suffix)))
            }
            IdKind::Absolute => Some(Expanded::Iri(id.to_string())),
            IdKind::Term if vocab_relative => {
                self.terms.get(id).map(|t| Expanded::Iri(t.iri.clone()))
            }
            IdKind::Term | IdKind::Relative => {
                if vocab_relative {
                    self.vocab
                        .as_ref()
                        .map(|vocab| Expanded::Iri(format!("{}{}", vocab, id)))
                } else {
                    self.resolve(id).map(|u| Expanded::Iri(u.to_string()))
                }
            }
        }
    }

    /// Resolve a relative reference against `@base`
    fn resolve(&self, reference: &str) -> Option<Url> {
        match &self.base {
            Some(base) => base.join(reference).ok(),
            None => Url::parse(reference).ok(),
        }
    }

    /// Prefix definitions that look like namespaces, sorted by prefix
    pub fn namespaces(&self) -> Vec<(String, String)> {
        let mut namespaces: Vec<(String, String)> = self
            .terms
            .iter()
            .filter(|(_, def)| def.coercion.is_none() && (def.iri.ends_with('/') || def.iri.ends_with('#')))
            .map(|(prefix, def)| (prefix.clone(), def.iri.clone()))
            .collect();
        namespaces.sort();
        namespaces
    }
}

fn into_iri(expanded: Expanded) -> Option<String> {
    match expanded {
        Expanded::Iri(iri) => Some(iri),
        Expanded::Blank(_) => None,
    }
}

/// Prefix of a compact IRI such as `schema:name`
///
/// Blank node labels and IRIs with an authority (`https://...`) have none.
fn compact_prefix(id: &str) -> Option<&str> {
    if id.starts_with("_:") {
        return None;
    }
    let (prefix, suffix) = id.split_once(':')?;
    (!suffix.starts_with("//")).then_some(prefix)
}

/// Classify an identifier string given a predicate telling whether a name
/// is a defined term
pub fn classify_id(id: &str, is_term: impl Fn(&str) -> bool) -> IdKind {
    if id.starts_with('@') {
        IdKind::Keyword
    } else if id.starts_with("_:") {
        IdKind::BlankNode
    } else if let Some((prefix, suffix)) = id.split_once(':') {
        if !suffix.starts_with("//") && is_term(prefix) {
            IdKind::Compact
        } else {
            IdKind::Absolute
        }
    } else if is_term(id) {
        IdKind::Term
    } else {
        IdKind::Relative
    }
}
