//! Agent roles of the translation crew.
//!
//! The roles themselves (prompting, parsing, calling the model) live in the
//! application layer; the domain only names them so that results, events
//! and failures can be attributed.

pub mod role;

pub use role::AgentRole;
