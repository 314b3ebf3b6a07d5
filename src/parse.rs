//!
//! Line-based text format for graphs with optional vertex metadata.
//!
//! ```text
//! # users on the left, films on the right
//! [vertices]
//! ana     type=user  pos=0.15,0.85
//! bia     type=user  x=0.15 y=0.5
//! matrix  type=film
//! [edges]
//! ana matrix
//! bia x matrix
//! ```
//!
//! - `#` starts a comment which runs to the end of the line, blank lines are ignored.
//! - The section headers `[vertices]` and `[edges]` are optional; lines before the first
//!   header are edges.
//! - A vertex line names the vertex, followed by `key=value` pairs. `pos=x,y` or the pair
//!   `x=`/`y=` set the position, every other key becomes a free-form attribute.
//! - An edge line contains two vertex names, optionally separated by a literal `x`.
//!
//! Vertices appear in the resulting graph in the order in which they are first mentioned.
//! Names cannot contain whitespace, `#` or (for the first token of a vertex line) `=`.
use std::io::BufRead;

use tracing::debug;

use crate::error::LoadError;
use crate::graph::*;
use crate::labelgraph::{LabelGraph, Position, VertexData};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Section {
    #[default]
    Edges,
    Vertices
}

/// Incremental parser, fed one line at a time.
#[derive(Debug, Default)]
pub struct Parser {
    graph: LabelGraph<String>,
    section: Section,
    lines: usize,
}

impl Parser {
    pub fn new() -> Self {
        Parser::default()
    }

    /// Parses a single line. `lineno` is 1-based and only used for error messages.
    pub fn feed(&mut self, lineno:usize, line:&str) -> Result<(), LoadError> {
        self.lines += 1;
        let content = strip_comment(line).trim();
        if content.is_empty() {
            return Ok(())
        }

        if let Some(header) = content.strip_prefix('[') {
            let Some(name) = header.strip_suffix(']') else {
                return Err(LoadError::syntax(lineno, format!("unterminated section header `{content}`")))
            };
            self.section = match name.trim().to_ascii_lowercase().as_str() {
                "vertices" => Section::Vertices,
                "edges" => Section::Edges,
                other => return Err(LoadError::syntax(lineno, format!("unknown section `[{other}]`")))
            };
            return Ok(())
        }

        match self.section {
            Section::Vertices => self.vertex_line(lineno, content),
            Section::Edges => self.edge_line(lineno, content)
        }
    }

    pub fn finish(self) -> LabelGraph<String> {
        debug!(lines = self.lines, vertices = self.graph.num_vertices(),
               edges = self.graph.num_edges(), "parsed graph");
        self.graph
    }

    fn vertex_line(&mut self, lineno:usize, content:&str) -> Result<(), LoadError> {
        let mut tokens = content.split_whitespace();
        let Some(id) = tokens.next() else {
            return Ok(())
        };
        if id.contains('=') {
            return Err(LoadError::syntax(lineno, format!("expected a vertex name, found `{id}`")))
        }

        let mut data = VertexData::new();
        let mut x = None;
        let mut y = None;
        for token in tokens {
            let Some((key, value)) = token.split_once('=') else {
                return Err(LoadError::syntax(lineno, format!("expected `key=value`, found `{token}`")))
            };
            match key {
                "" => return Err(LoadError::syntax(lineno, format!("missing attribute name in `{token}`"))),
                "pos" => {
                    let Some((px, py)) = value.split_once(',') else {
                        return Err(LoadError::syntax(lineno, format!("expected `pos=x,y`, found `{token}`")))
                    };
                    x = Some(parse_coordinate(lineno, px)?);
                    y = Some(parse_coordinate(lineno, py)?);
                }
                "x" => x = Some(parse_coordinate(lineno, value)?),
                "y" => y = Some(parse_coordinate(lineno, value)?),
                _ => {
                    data.attributes.insert(key.to_string(), value.to_string());
                }
            }
        }

        match (x, y) {
            (Some(x), Some(y)) => data.position = Some(Position::new(x, y)),
            (None, None) => {}
            _ => return Err(LoadError::syntax(lineno, format!("position of `{id}` needs both x and y")))
        }

        self.graph.add_vertex_with(&id.to_string(), data);
        Ok(())
    }

    fn edge_line(&mut self, lineno:usize, content:&str) -> Result<(), LoadError> {
        let tokens:Vec<&str> = content.split_whitespace().collect();
        let (u, v) = match tokens.as_slice() {
            [u, v] => (*u, *v),
            [u, sep, v] if sep.eq_ignore_ascii_case("x") => (*u, *v),
            _ => return Err(LoadError::syntax(lineno,
                    format!("expected two vertices separated by whitespace, found `{content}`")))
        };

        self.graph.add_edge(&u.to_string(), &v.to_string());
        Ok(())
    }
}

/// Parses a whole graph from `reader`.
pub fn parse_reader<R: BufRead>(reader:R) -> Result<LabelGraph<String>, LoadError> {
    let mut parser = Parser::new();
    for (i, line) in reader.lines().enumerate() {
        parser.feed(i+1, &line?)?;
    }

    Ok(parser.finish())
}

/// Parses a whole graph from an in-memory string.
pub fn parse_str(text:&str) -> Result<LabelGraph<String>, LoadError> {
    let mut parser = Parser::new();
    for (i, line) in text.lines().enumerate() {
        parser.feed(i+1, line)?;
    }

    Ok(parser.finish())
}

fn strip_comment(line:&str) -> &str {
    line.split_once('#').map_or(line, |(content, _)| content)
}

fn parse_coordinate(lineno:usize, s:&str) -> Result<f64, LoadError> {
    s.trim().parse::<f64>()
        .map_err(|_| LoadError::syntax(lineno, format!("cannot parse coordinate `{s}`")))
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####
