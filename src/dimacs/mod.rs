//! DIMACS road network input
//!
//! Line-oriented text: `c` comments, one `p sp <nodes> <arcs>` problem
//! line and `a <from> <to> <weight>` arc lines.

pub mod loader;
pub mod parser;

pub use loader::{load_graph, read_graph, LoadStats, LoadedGraph};
pub use parser::{parse_str, EdgeReader, ParseError, ParsePolicy, ParseResult, ProblemLine};
