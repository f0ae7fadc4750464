//! Parser for the sectioned questline problem format.
//!
//! A problem file is a sequence of sections, each introduced by a
//! header line and followed by payload lines until the next header:
//!
//! ```text
//! Vertex Count:
//! 3
//! Vertexes:
//! 0 Harbor
//! 1 Market
//! Edges:
//! 0 1
//! 1 2 2.5
//! Start:
//! 0
//! Quests:
//! 1 2
//! Quest Names:
//! 0 Deliver the ledger
//! ```
//!
//! Edges default to weight 1 when no third field is given. Blank
//! lines are ignored; names run to the end of the line and may
//! contain spaces.

use std::collections::HashMap;

use questline_core::{Graph, GraphError, QuestLine, Vertex};
use thiserror::Error;

/// A parsed problem: the graph, quest lines, optional start vertex,
/// and the display-name tables used by reporting.
#[derive(Debug, Clone)]
pub struct Problem {
    /// The weighted graph.
    pub graph: Graph,
    /// Pinned start vertex, when the file names one.
    pub start: Option<Vertex>,
    /// Quest lines in file order.
    pub quest_lines: Vec<QuestLine>,
    /// Display names per vertex index.
    pub vertex_names: HashMap<Vertex, String>,
    /// Display names per quest-line index.
    pub quest_names: HashMap<usize, String>,
}

/// Errors from [`parse_str`].
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    /// Payload appeared before any section header.
    #[error("line {line}: {text:?} appears before any section header")]
    OutsideSection {
        /// 1-based line number.
        line: usize,
        /// The offending text.
        text: String,
    },
    /// An integer field could not be parsed.
    #[error("line {line}: expected an integer, got {text:?}")]
    InvalidInteger {
        /// 1-based line number.
        line: usize,
        /// The offending text.
        text: String,
    },
    /// An edge weight could not be parsed.
    #[error("line {line}: expected a numeric weight, got {text:?}")]
    InvalidWeight {
        /// 1-based line number.
        line: usize,
        /// The offending text.
        text: String,
    },
    /// A name entry was not `<index> <name>`.
    #[error("line {line}: expected `<index> <name>`, got {text:?}")]
    InvalidNameEntry {
        /// 1-based line number.
        line: usize,
        /// The offending text.
        text: String,
    },
    /// An edge line was not `<from> <to> [weight]`.
    #[error("line {line}: expected `<from> <to> [weight]`, got {text:?}")]
    InvalidEdge {
        /// 1-based line number.
        line: usize,
        /// The offending text.
        text: String,
    },
    /// The graph rejected an edge.
    #[error("line {line}: {source}")]
    Graph {
        /// 1-based line number.
        line: usize,
        /// The graph's rejection.
        #[source]
        source: GraphError,
    },
}

#[derive(Debug, Clone, Copy)]
enum Section {
    VertexCount,
    Vertexes,
    Edges,
    Start,
    Quests,
    QuestNames,
}

/// Parse a problem from its textual form.
pub fn parse_str(input: &str) -> Result<Problem, ParseError> {
    let mut section: Option<Section> = None;
    let mut graph = Graph::new(0);
    let mut start = None;
    let mut quest_lines = Vec::new();
    let mut vertex_names = HashMap::new();
    let mut quest_names = HashMap::new();

    for (offset, raw) in input.lines().enumerate() {
        let line = offset + 1;
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }
        match text {
            "Vertex Count:" => section = Some(Section::VertexCount),
            "Vertexes:" => section = Some(Section::Vertexes),
            "Edges:" => section = Some(Section::Edges),
            "Start:" => section = Some(Section::Start),
            "Quests:" => section = Some(Section::Quests),
            "Quest Names:" => section = Some(Section::QuestNames),
            _ => match section {
                None => {
                    return Err(ParseError::OutsideSection {
                        line,
                        text: text.to_owned(),
                    });
                }
                Some(Section::VertexCount) => graph = Graph::new(parse_index(line, text)?),
                Some(Section::Vertexes) => {
                    let (index, name) = parse_name_entry(line, text)?;
                    vertex_names.insert(index, name);
                }
                Some(Section::Edges) => parse_edge(line, text, &mut graph)?,
                Some(Section::Start) => start = Some(parse_index(line, text)?),
                Some(Section::Quests) => {
                    let stops = text
                        .split_whitespace()
                        .map(|token| parse_index(line, token))
                        .collect::<Result<Vec<Vertex>, ParseError>>()?;
                    quest_lines.push(QuestLine::new(stops));
                }
                Some(Section::QuestNames) => {
                    let (index, name) = parse_name_entry(line, text)?;
                    quest_names.insert(index, name);
                }
            },
        }
    }

    Ok(Problem {
        graph,
        start,
        quest_lines,
        vertex_names,
        quest_names,
    })
}

fn parse_index(line: usize, text: &str) -> Result<usize, ParseError> {
    text.parse().map_err(|_| ParseError::InvalidInteger {
        line,
        text: text.to_owned(),
    })
}

fn parse_name_entry(line: usize, text: &str) -> Result<(usize, String), ParseError> {
    let invalid = || ParseError::InvalidNameEntry {
        line,
        text: text.to_owned(),
    };
    let (index_text, name) = text.split_once(char::is_whitespace).ok_or_else(invalid)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid());
    }
    let index = index_text.parse().map_err(|_| invalid())?;
    Ok((index, name.to_owned()))
}

fn parse_edge(line: usize, text: &str, graph: &mut Graph) -> Result<(), ParseError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    let (from_text, to_text, weight_text) = match fields.as_slice() {
        [from, to] => (*from, *to, None),
        [from, to, weight] => (*from, *to, Some(*weight)),
        _ => {
            return Err(ParseError::InvalidEdge {
                line,
                text: text.to_owned(),
            });
        }
    };
    let from = parse_index(line, from_text)?;
    let to = parse_index(line, to_text)?;
    let weight = match weight_text {
        // An edge without an explicit weight costs one unit.
        None => 1.0,
        Some(token) => token.parse().map_err(|_| ParseError::InvalidWeight {
            line,
            text: token.to_owned(),
        })?,
    };
    graph
        .set_weight(from, to, weight)
        .map_err(|source| ParseError::Graph { line, source })
}
