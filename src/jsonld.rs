//! JSON-LD documents to triples
//!
//! Walks node objects the way they appear in the document: `@id`/`@type`
//! first, then every property that expands to an absolute IRI. Nested node
//! objects without an `@id` become blank nodes, `@graph` contents are
//! flattened into the default graph and `@list`/`@set` members are asserted
//! one by one.

use std::collections::HashMap;

use oxrdf::vocab::{rdf, xsd};
use oxrdf::{BlankNode, Literal, NamedNode, NamedOrBlankNode, Term, Triple};
use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::error::ConvertError;
use crate::id::{Coercion, Context, Expanded, TermDefinition};
use crate::loader::ParsedDocument;

/// Convert a parsed JSON-LD document into triples
pub fn to_triples(
    document: &Value,
    base_iri: Option<&str>,
    source: &str,
) -> Result<ParsedDocument, ConvertError> {
    let mut walker = Walker::new(source);
    let context = Context::with_base(base_iri);

    match document {
        Value::Array(nodes) => {
            for node in nodes {
                walker.top_level(node, &context)?;
            }
        }
        Value::Object(_) => walker.top_level(document, &context)?,
        _ => return Err(walker.invalid("document must be an object or an array")),
    }

    Ok(ParsedDocument {
        triples: walker.triples,
        prefixes: walker.prefixes,
    })
}

/// Extract @id from a node object
pub fn extract_id(node: &Map<String, Value>) -> Option<&str> {
    node.get("@id").and_then(|v| v.as_str())
}

/// Extract @type as a list of type names
pub fn extract_types(node: &Map<String, Value>) -> Vec<&str> {
    match node.get("@type") {
        Some(Value::String(t)) => vec![t.as_str()],
        Some(Value::Array(arr)) => arr.iter().filter_map(|v| v.as_str()).collect(),
        _ => vec![],
    }
}

struct Walker<'a> {
    source: &'a str,
    triples: Vec<Triple>,
    prefixes: Vec<(String, String)>,
    /// Document labels to blank nodes
    blank_nodes: HashMap<String, BlankNode>,
}

impl<'a> Walker<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            triples: Vec::new(),
            prefixes: Vec::new(),
            blank_nodes: HashMap::new(),
        }
    }

    fn invalid(&self, reason: impl Into<String>) -> ConvertError {
        ConvertError::InvalidJsonLd {
            path: self.source.to_string(),
            reason: reason.into(),
        }
    }

    fn top_level(&mut self, value: &Value, context: &Context) -> Result<(), ConvertError> {
        match value {
            Value::Object(obj) => {
                self.node(obj, context)?;
                Ok(())
            }
            _ => Err(self.invalid("top-level entries must be node objects")),
        }
    }

    /// Apply a node's local context if it has one
    fn local_context(
        &mut self,
        obj: &Map<String, Value>,
        context: &Context,
    ) -> Result<Option<Context>, ConvertError> {
        let Some(local) = obj.get("@context") else {
            return Ok(None);
        };
        let active = context.apply(local).map_err(|e| self.invalid(e))?;
        for (prefix, iri) in active.namespaces() {
            if !self.prefixes.iter().any(|(p, _)| *p == prefix) {
                self.prefixes.push((prefix, iri));
            }
        }
        Ok(Some(active))
    }

    fn blank(&mut self, label: &str) -> BlankNode {
        self.blank_nodes
            .entry(label.to_string())
            .or_default()
            .clone()
    }

    fn named_node(&self, iri: String) -> Option<NamedNode> {
        match NamedNode::new(iri) {
            Ok(node) => Some(node),
            Err(e) => {
                debug!(source = self.source, error = %e, "dropping invalid IRI");
                None
            }
        }
    }

    fn expanded_to_term(&mut self, expanded: Expanded) -> Option<Term> {
        match expanded {
            Expanded::Iri(iri) => self.named_node(iri).map(Term::from),
            Expanded::Blank(label) => Some(self.blank(&label).into()),
        }
    }

    fn expanded_to_subject(&mut self, expanded: Expanded) -> Option<NamedOrBlankNode> {
        match expanded {
            Expanded::Iri(iri) => self.named_node(iri).map(NamedOrBlankNode::from),
            Expanded::Blank(label) => Some(self.blank(&label).into()),
        }
    }

    /// Emit the triples of one node object and return its subject
    fn node(
        &mut self,
        obj: &Map<String, Value>,
        context: &Context,
    ) -> Result<NamedOrBlankNode, ConvertError> {
        let local = self.local_context(obj, context)?;
        let context = local.as_ref().unwrap_or(context);

        let subject = extract_id(obj)
            .and_then(|id| context.expand(id, false))
            .and_then(|expanded| self.expanded_to_subject(expanded))
            .unwrap_or_else(|| BlankNode::default().into());

        for type_name in extract_types(obj) {
            let Some(object) = context
                .expand(type_name, true)
                .and_then(|expanded| self.expanded_to_term(expanded))
            else {
                continue;
            };
            self.triples
                .push(Triple::new(subject.clone(), rdf::TYPE, object));
        }

        for (key, value) in obj {
            match key.as_str() {
                "@graph" => self.graph(value, context)?,
                "@reverse" => self.reverse(&subject, value, context)?,
                k if k.starts_with('@') => {}
                _ => {
                    let Some(Expanded::Iri(iri)) = context.expand(key, true) else {
                        continue;
                    };
                    let Some(predicate) = self.named_node(iri) else {
                        continue;
                    };
                    let definition = context.terms.get(key.as_str());
                    let mut objects = Vec::new();
                    self.values(value, definition, context, &mut objects)?;
                    for object in objects {
                        self.triples
                            .push(Triple::new(subject.clone(), predicate.clone(), object));
                    }
                }
            }
        }

        Ok(subject)
    }

    fn graph(&mut self, value: &Value, context: &Context) -> Result<(), ConvertError> {
        match value {
            Value::Array(nodes) => {
                for node in nodes {
                    if let Value::Object(obj) = node {
                        self.node(obj, context)?;
                    }
                }
            }
            Value::Object(obj) => {
                self.node(obj, context)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn reverse(
        &mut self,
        subject: &NamedOrBlankNode,
        value: &Value,
        context: &Context,
    ) -> Result<(), ConvertError> {
        let Value::Object(properties) = value else {
            return Err(self.invalid("@reverse must be an object"));
        };
        for (key, value) in properties {
            let Some(Expanded::Iri(iri)) = context.expand(key, true) else {
                continue;
            };
            let Some(predicate) = self.named_node(iri) else {
                continue;
            };
            let mut objects = Vec::new();
            self.values(value, None, context, &mut objects)?;
            for object in objects {
                let reverse_subject = match object {
                    Term::NamedNode(node) => NamedOrBlankNode::from(node),
                    Term::BlankNode(node) => NamedOrBlankNode::from(node),
                    _ => continue,
                };
                self.triples.push(Triple::new(
                    reverse_subject,
                    predicate.clone(),
                    subject.clone(),
                ));
            }
        }
        Ok(())
    }

    /// Collect the RDF terms denoted by a property value
    fn values(
        &mut self,
        value: &Value,
        definition: Option<&TermDefinition>,
        context: &Context,
        out: &mut Vec<Term>,
    ) -> Result<(), ConvertError> {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    self.values(item, definition, context, out)?;
                }
            }
            Value::String(s) => {
                if let Some(term) = self.string_value(s, definition, context)? {
                    out.push(term);
                }
            }
            Value::Number(n) => {
                let datatype = definition.and_then(|d| match &d.coercion {
                    Some(Coercion::Datatype(dt)) => Some(dt.as_str()),
                    _ => None,
                });
                out.push(self.number_literal(n, datatype)?.into());
            }
            Value::Bool(b) => {
                out.push(Literal::new_typed_literal(b.to_string(), xsd::BOOLEAN).into());
            }
            Value::Object(obj) => {
                if obj.contains_key("@value") {
                    if let Some(literal) = self.value_object(obj, context)? {
                        out.push(literal.into());
                    }
                } else if let Some(list) = obj.get("@list").or_else(|| obj.get("@set")) {
                    self.values(list, definition, context, out)?;
                } else {
                    let node = self.node(obj, context)?;
                    out.push(node.into());
                }
            }
        }
        Ok(())
    }

    fn string_value(
        &mut self,
        s: &str,
        definition: Option<&TermDefinition>,
        context: &Context,
    ) -> Result<Option<Term>, ConvertError> {
        let coercion = definition.and_then(|d| d.coercion.as_ref());
        let term = match coercion {
            Some(Coercion::Id) => context
                .expand(s, false)
                .and_then(|expanded| self.expanded_to_term(expanded)),
            Some(Coercion::Vocab) => context
                .expand(s, true)
                .and_then(|expanded| self.expanded_to_term(expanded)),
            Some(Coercion::Datatype(datatype)) => {
                let datatype = self.named_node(datatype.clone());
                datatype.map(|dt| Literal::new_typed_literal(s, dt).into())
            }
            None => {
                let language = match definition.and_then(|d| d.language.as_ref()) {
                    Some(explicit) => explicit.as_deref(),
                    None => context.language.as_deref(),
                };
                Some(self.string_literal(s, language)?.into())
            }
        };
        Ok(term)
    }

    fn string_literal(&self, value: &str, language: Option<&str>) -> Result<Literal, ConvertError> {
        match language {
            Some(tag) => Literal::new_language_tagged_literal(value, tag)
                .map_err(|e| self.invalid(format!("invalid language tag '{}': {}", tag, e))),
            None => Ok(Literal::new_simple_literal(value)),
        }
    }

    fn number_literal(&self, n: &Number, datatype: Option<&str>) -> Result<Literal, ConvertError> {
        let (lexical, default_type) = if n.is_i64() || n.is_u64() {
            (n.to_string(), xsd::INTEGER)
        } else {
            let f = n
                .as_f64()
                .ok_or_else(|| self.invalid(format!("unrepresentable number {}", n)))?;
            (canonical_double(f), xsd::DOUBLE)
        };
        let datatype = match datatype.and_then(|dt| self.named_node(dt.to_string())) {
            Some(dt) => dt,
            None => default_type.into_owned(),
        };
        Ok(Literal::new_typed_literal(lexical, datatype))
    }

    /// `{"@value": ..., "@language": ..., "@type": ...}`
    ///
    /// A value object never picks up the default language.
    fn value_object(
        &mut self,
        obj: &Map<String, Value>,
        context: &Context,
    ) -> Result<Option<Literal>, ConvertError> {
        let datatype = match obj.get("@type").and_then(|t| t.as_str()) {
            Some(t) => match context.expand(t, true) {
                Some(Expanded::Iri(iri)) => self.named_node(iri),
                _ => None,
            },
            None => None,
        };
        let language = obj.get("@language").and_then(|l| l.as_str());

        let literal = match obj.get("@value") {
            Some(Value::String(s)) => match datatype {
                Some(dt) => Literal::new_typed_literal(s.as_str(), dt),
                None => self.string_literal(s, language)?,
            },
            Some(Value::Number(n)) => {
                self.number_literal(n, datatype.as_ref().map(|d| d.as_str()))?
            }
            Some(Value::Bool(b)) => {
                let dt = datatype.unwrap_or_else(|| xsd::BOOLEAN.into_owned());
                Literal::new_typed_literal(b.to_string(), dt)
            }
            Some(Value::Null) | None => return Ok(None),
            Some(_) => return Err(self.invalid("@value must be a scalar")),
        };
        Ok(Some(literal))
    }
}

/// xsd:double canonical lexical form, e.g. `1.5E0`
fn canonical_double(f: f64) -> String {
    let formatted = format!("{:E}", f);
    match formatted.split_once('E') {
        Some((mantissa, exponent)) if !mantissa.contains('.') => {
            format!("{}.0E{}", mantissa, exponent)
        }
        _ => formatted,
    }
}
