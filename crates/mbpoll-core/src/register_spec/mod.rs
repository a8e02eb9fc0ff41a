//! Register spec parsing.
//!
//! Turns the compact `start,end_or_count,format` triple into a validated
//! [`ReadPlan`]. The second field is read as a count when it is smaller than
//! the start address and as an inclusive end address otherwise. Two-register
//! formats round an odd count up before the range checks run, so the checks
//! always see the count that will actually be requested.
//!
//! Limits live in `layout`, tokenizing in `reader`, and the ordered
//! validation rules in `parser`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod plan;
pub mod reader;

pub use error::SpecError;
pub use parser::{parse, parse_csv};
pub use plan::ReadPlan;
