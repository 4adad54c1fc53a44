//! Read-only traits over the schema types

mod schema;

pub use schema::SchemaInspector;
