//! Database session, schema and statements

pub mod init;
pub mod models;
pub mod queries;
pub mod schema;

pub use init::*;
pub use models::*;
pub use queries::QuerySet;
pub use schema::*;
