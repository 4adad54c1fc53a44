//! Typed value codec engine for column-oriented, schema-aware stores
//!
//! `colcodec-core` maps strongly-typed, arbitrarily nested Rust values onto
//! the wire cells of a column store and back. It declares the wire type of
//! every mapped value and validates each cell against that declaration on
//! the way back in.
//!
//! # Key Components
//!
//! - **Properties**: the mapping nodes
//!   - Every node implements [`property::Property`] (typed encode/decode)
//!     and [`property::PropertyMeta`] (arity-agnostic view)
//!   - Scalars, lists, sets, maps and user types under [`property`]
//!   - Fixed-arity tuples of one to ten components under [`tuple`]
//!
//! - **Codecs**: scalar conversion through [`codec::ScalarCodec`]
//!   - Native types with optional numeric widening
//!   - Enumerations, JSON, `Display`/`FromStr` and custom codecs
//!
//! - **Schema**: wire type descriptors
//!   - [`schema::DataType`] mirrors the property tree that produced it
//!   - Table layouts built with [`schema::SchemaBuilder`]
//!   - Introspection through the [`traits::SchemaInspector`] trait
//!
//! - **Values**: wire cells, composites and result rows under [`value`]
//!
//! - **Arrow Conversion**: whole columns of wire cells to Arrow arrays and
//!   back, driven by the wire descriptor
//!
//! - **Configuration**: naming strategy, enum encoding and keyspace through
//!   [`config::CodecConfig`], which also builds properties
//!
//! # Design Philosophy
//!
//! Property trees are built once, never mutated, and shared across threads.
//! Statement execution and schema discovery belong to the caller; this crate
//! only converts values and validates shapes.

pub mod arrow_conversion;
pub mod codec;
pub mod config;
pub mod error;
pub mod property;
pub mod schema;
pub mod traits;
pub mod tuple;
pub mod value;

#[cfg(test)]
pub mod test_utils;

pub use codec::{EnumValue, NativeCodec, ScalarCodec};
pub use config::{CodecConfig, CodecConfigBuilder, EnumEncoding, NamingStrategy};
pub use error::{CodecError, ErrorContext, ErrorKind, Result};
pub use property::{FieldInfo, Property, PropertyKind, PropertyMeta, RawValue};
pub use schema::{DataType, ScalarType, Schema, SchemaBuilder, TupleType, UserType};
pub use tuple::{
    Tuple10Property, Tuple1Property, Tuple2Property, Tuple3Property, Tuple4Property,
    Tuple5Property, Tuple6Property, Tuple7Property, Tuple8Property, Tuple9Property,
    TupleProperty,
};
pub use value::{Row, UdtValue, WireComposite, WireValue};
