//! SQL dump to column catalog conversion module.

mod dialect;
mod parser;
mod patterns;

pub use dialect::Dialect;
pub use parser::{
    parse, parse_str, parse_with_report, step, DumpParser, LineAction, ParseReport, ParserState,
    Step,
};
