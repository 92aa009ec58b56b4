//! Row writes and lookups against the star schema
//!
//! Every function takes the connection of the transaction that owns the
//! current file, plus the statement set in use.

pub mod dimensions;
pub mod songplays;
