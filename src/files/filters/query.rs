//! A small XPath subset for locating translatable parts of XML documents.
//!
//! Supported:
//!
//! - location paths: `/resources/string`, `//string`, `resources//item`
//! - name tests with optional prefix (`android:string` matches on the local name)
//! - `*`, `text()`, `.`, `..`, `@name` and `@*` (attributes must be the last step)
//! - predicates: `[2]`, `[@name]`, `[@name='value']`, `[child]`, `[child="value"]`
//! - unions: `//title | //description`
//!
//! Relative paths are evaluated from the document node, like absolute ones.

use std::collections::HashSet;

use roxmltree::{Document, Node};

use crate::files::SelectError;

/// A parsed query. Each `|` alternative is evaluated independently.
#[derive(Debug, Clone)]
pub struct Query {
    text: String,
    paths: Vec<LocationPath>,
}

#[derive(Debug, Clone)]
struct LocationPath {
    steps: Vec<Step>,
}

#[derive(Debug, Clone)]
struct Step {
    /// Set when the step follows `//`.
    descendants: bool,
    test: NodeTest,
    predicates: Vec<Predicate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeTest {
    Element(Option<String>),
    Attribute(Option<String>),
    Text,
    SelfNode,
    Parent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Predicate {
    Position(usize),
    Attribute {
        name: Option<String>,
        value: Option<String>,
    },
    Child {
        name: String,
        value: Option<String>,
    },
}

/// One item selected by a query.
#[derive(Debug, Clone, Copy)]
pub enum Hit<'a, 'input> {
    Node(Node<'a, 'input>),
    Attribute(&'a str),
}

impl Hit<'_, '_> {
    /// True if the element, text node or attribute carries non-whitespace text.
    pub fn has_visible_text(&self) -> bool {
        match self {
            Hit::Node(node) => has_visible_text(*node),
            Hit::Attribute(value) => !value.trim().is_empty(),
        }
    }
}

impl Query {
    pub fn parse(text: &str) -> Result<Self, SelectError> {
        let invalid = |reason: String| SelectError::InvalidQuery {
            query: text.to_string(),
            reason,
        };

        let paths = split_top_level(text, '|')
            .map_err(invalid)?
            .into_iter()
            .map(|part| parse_path(part.trim()).map_err(invalid))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            text: text.to_string(),
            paths,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn select<'a, 'input>(&self, doc: &'a Document<'input>) -> Vec<Hit<'a, 'input>> {
        self.paths.iter().flat_map(|path| path.evaluate(doc)).collect()
    }

    /// True if any alternative selects something with visible text.
    pub fn matches(&self, doc: &Document) -> bool {
        self.select(doc).iter().any(Hit::has_visible_text)
    }
}

impl LocationPath {
    fn evaluate<'a, 'input>(&self, doc: &'a Document<'input>) -> Vec<Hit<'a, 'input>> {
        let Some((last, init)) = self.steps.split_last() else {
            return Vec::new();
        };

        let mut context = vec![doc.root()];
        for step in init {
            context = step.nodes(&context);
            if context.is_empty() {
                return Vec::new();
            }
        }

        match &last.test {
            NodeTest::Attribute(name) => last.attributes(&context, name.as_deref()),
            _ => last.nodes(&context).into_iter().map(Hit::Node).collect(),
        }
    }
}

impl Step {
    fn nodes<'a, 'input>(&self, context: &[Node<'a, 'input>]) -> Vec<Node<'a, 'input>> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();

        for &node in context {
            let candidates: Vec<Node<'a, 'input>> = match &self.test {
                NodeTest::SelfNode => apply_predicates(vec![node], &self.predicates),
                NodeTest::Parent => {
                    apply_predicates(node.parent().into_iter().collect(), &self.predicates)
                }
                NodeTest::Attribute(_) => Vec::new(),
                NodeTest::Element(_) | NodeTest::Text if self.descendants => {
                    // Positions count among siblings, so predicates run per parent.
                    let selected: HashSet<_> = node
                        .descendants()
                        .flat_map(|parent| self.matching_children(parent))
                        .map(|n| n.id())
                        .collect();
                    node.descendants()
                        .skip(1)
                        .filter(|n| selected.contains(&n.id()))
                        .collect()
                }
                NodeTest::Element(_) | NodeTest::Text => self.matching_children(node),
            };

            for candidate in candidates {
                if seen.insert(candidate.id()) {
                    out.push(candidate);
                }
            }
        }

        out
    }

    fn matching_children<'a, 'input>(&self, parent: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
        let children = parent.children().filter(|n| self.test.accepts(n)).collect();
        apply_predicates(children, &self.predicates)
    }

    fn attributes<'a, 'input>(
        &self,
        context: &[Node<'a, 'input>],
        name: Option<&str>,
    ) -> Vec<Hit<'a, 'input>> {
        let owners: Vec<Node<'a, 'input>> = if self.descendants {
            context
                .iter()
                .flat_map(|n| n.descendants())
                .filter(|n| n.is_element())
                .collect()
        } else {
            context.iter().copied().filter(|n| n.is_element()).collect()
        };

        owners
            .iter()
            .flat_map(|n| n.attributes())
            .filter(|a| name.is_none_or(|name| a.name() == name))
            .map(|a| Hit::Attribute(a.value()))
            .collect()
    }
}

impl NodeTest {
    fn accepts(&self, node: &Node) -> bool {
        match self {
            NodeTest::Element(None) => node.is_element(),
            NodeTest::Element(Some(name)) => node.is_element() && node.tag_name().name() == name,
            NodeTest::Text => node.is_text(),
            NodeTest::Attribute(_) | NodeTest::SelfNode | NodeTest::Parent => false,
        }
    }
}

impl Predicate {
    fn accepts(&self, node: &Node) -> bool {
        match self {
            Predicate::Position(_) => true,
            Predicate::Attribute { name, value } => node.attributes().any(|a| {
                name.as_deref().is_none_or(|n| a.name() == n)
                    && value.as_deref().is_none_or(|v| a.value() == v)
            }),
            Predicate::Child { name, value } => node
                .children()
                .filter(|c| c.is_element() && c.tag_name().name() == name)
                .any(|c| value.as_deref().is_none_or(|v| string_value(c) == v)),
        }
    }
}

fn apply_predicates<'a, 'input>(
    mut nodes: Vec<Node<'a, 'input>>,
    predicates: &[Predicate],
) -> Vec<Node<'a, 'input>> {
    for predicate in predicates {
        nodes = match predicate {
            Predicate::Position(position) => {
                nodes.get(position - 1).copied().into_iter().collect()
            }
            other => nodes.into_iter().filter(|n| other.accepts(n)).collect(),
        };
    }
    nodes
}

/// Concatenated text of a node and its descendants.
pub fn string_value(node: Node) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

pub fn has_visible_text(node: Node) -> bool {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .any(|text| !text.trim().is_empty())
}

// ============================================================
// Parsing
// ============================================================

/// Split on `separator`, ignoring separators inside predicates or quotes.
fn split_top_level(text: &str, separator: char) -> Result<Vec<&str>, String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (idx, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '\'' | '"' => quote = Some(c),
                '[' => depth += 1,
                ']' => depth = depth.checked_sub(1).ok_or("unbalanced ']'")?,
                c if c == separator && depth == 0 => {
                    parts.push(&text[start..idx]);
                    start = idx + c.len_utf8();
                }
                _ => {}
            },
        }
    }

    if quote.is_some() {
        return Err("unterminated string literal".to_string());
    }
    if depth > 0 {
        return Err("unbalanced '['".to_string());
    }

    parts.push(&text[start..]);
    Ok(parts)
}

fn parse_path(text: &str) -> Result<LocationPath, String> {
    if text.is_empty() {
        return Err("empty expression".to_string());
    }

    let segments = split_top_level(text, '/')?;
    let skip = usize::from(text.starts_with('/'));

    let mut steps = Vec::new();
    let mut descendants = false;

    for segment in segments.into_iter().skip(skip) {
        let segment = segment.trim();
        if segment.is_empty() {
            if descendants {
                return Err("unexpected '/'".to_string());
            }
            descendants = true;
            continue;
        }
        steps.push(parse_step(segment, descendants)?);
        descendants = false;
    }

    if descendants || steps.is_empty() {
        return Err("expression must end with a step".to_string());
    }

    if steps[..steps.len() - 1]
        .iter()
        .any(|s| matches!(s.test, NodeTest::Attribute(_)))
    {
        return Err("attribute steps must come last".to_string());
    }

    Ok(LocationPath { steps })
}

fn parse_step(text: &str, descendants: bool) -> Result<Step, String> {
    let (head, mut rest) = match text.find('[') {
        Some(idx) => (text[..idx].trim(), &text[idx..]),
        None => (text, ""),
    };

    let mut predicates = Vec::new();
    while !rest.is_empty() {
        let end = closing_bracket(rest)?;
        predicates.push(parse_predicate(rest[1..end].trim())?);
        rest = rest[end + 1..].trim_start();
        if !rest.is_empty() && !rest.starts_with('[') {
            return Err(format!("unexpected '{rest}'"));
        }
    }

    let test = match head {
        "." => NodeTest::SelfNode,
        ".." => NodeTest::Parent,
        "text()" => NodeTest::Text,
        "*" => NodeTest::Element(None),
        "@*" => NodeTest::Attribute(None),
        _ => match head.strip_prefix('@') {
            Some(name) => NodeTest::Attribute(Some(parse_name(name)?)),
            None => NodeTest::Element(Some(parse_name(head)?)),
        },
    };

    let has_predicates = !predicates.is_empty();
    match test {
        NodeTest::SelfNode | NodeTest::Parent if descendants || has_predicates => {
            Err(format!("'{head}' cannot follow '//' or take predicates"))
        }
        NodeTest::Attribute(_) if has_predicates => {
            Err("attribute steps cannot take predicates".to_string())
        }
        _ => Ok(Step {
            descendants,
            test,
            predicates,
        }),
    }
}

/// Index of the `]` closing the predicate that `text` starts with.
fn closing_bracket(text: &str) -> Result<usize, String> {
    let mut quote: Option<char> = None;
    for (idx, c) in text.char_indices().skip(1) {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '\'' | '"' => quote = Some(c),
                '[' => return Err("nested predicates are not supported".to_string()),
                ']' => return Ok(idx),
                _ => {}
            },
        }
    }
    Err("unbalanced '['".to_string())
}

fn parse_predicate(text: &str) -> Result<Predicate, String> {
    if text.is_empty() {
        return Err("empty predicate".to_string());
    }

    if text.chars().all(|c| c.is_ascii_digit()) {
        return match text.parse::<usize>() {
            Ok(position) if position > 0 => Ok(Predicate::Position(position)),
            _ => Err(format!("invalid position '{text}'")),
        };
    }

    let (lhs, value) = match split_top_level(text, '=')?.as_slice() {
        [lhs] => (lhs.trim(), None),
        [lhs, rhs] => (lhs.trim(), Some(parse_literal(rhs.trim())?)),
        _ => return Err(format!("unsupported predicate '{text}'")),
    };

    match lhs.strip_prefix('@') {
        Some("*") => Ok(Predicate::Attribute { name: None, value }),
        Some(name) => Ok(Predicate::Attribute {
            name: Some(parse_name(name)?),
            value,
        }),
        None => Ok(Predicate::Child {
            name: parse_name(lhs)?,
            value,
        }),
    }
}

fn parse_literal(text: &str) -> Result<String, String> {
    let quoted = |q: char| text.len() >= 2 && text.starts_with(q) && text.ends_with(q);
    if quoted('\'') || quoted('"') {
        Ok(text[1..text.len() - 1].to_string())
    } else {
        Err(format!("expected a quoted string, found '{text}'"))
    }
}

/// Validate a (possibly prefixed) name and return its local part.
fn parse_name(text: &str) -> Result<String, String> {
    if text.contains("::") {
        return Err(format!("axis syntax is not supported: '{text}'"));
    }

    let valid_start = text
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_');
    let valid_rest = text
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'));
    if !valid_start || !valid_rest {
        return Err(format!("unsupported expression '{text}'"));
    }

    let local = text.rsplit(':').next().unwrap_or(text);
    if local.is_empty() {
        return Err(format!("unsupported expression '{text}'"));
    }
    Ok(local.to_string())
}
