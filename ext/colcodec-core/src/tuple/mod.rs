//! Fixed-arity composite properties.
//!
//! [`TupleProperty`] composes one to ten component properties, held as a
//! native tuple, and maps native tuple values onto [`WireComposite`]s. The
//! composite's type descriptor is assembled from its components on first
//! use and cached for the life of the property.

mod components;
mod extract;

pub use components::TupleComponents;
pub use extract::extract_component;

use crate::error::{CodecError, Result};
use crate::property::{expect_wire_cell, FieldInfo, Property, PropertyKind, PropertyMeta, RawValue};
use crate::schema::{DataType, TupleType};
use crate::value::{WireComposite, WireValue};
use std::sync::OnceLock;
use tracing::{debug, trace};

/// Composite property over the component properties `C`
#[derive(Debug)]
pub struct TupleProperty<C: TupleComponents> {
    field: FieldInfo,
    components: C,
    tuple_type: OnceLock<TupleType>,
}

pub type Tuple1Property<A> = TupleProperty<(A,)>;
pub type Tuple2Property<A, B> = TupleProperty<(A, B)>;
pub type Tuple3Property<A, B, C> = TupleProperty<(A, B, C)>;
pub type Tuple4Property<A, B, C, D> = TupleProperty<(A, B, C, D)>;
pub type Tuple5Property<A, B, C, D, E> = TupleProperty<(A, B, C, D, E)>;
pub type Tuple6Property<A, B, C, D, E, F> = TupleProperty<(A, B, C, D, E, F)>;
pub type Tuple7Property<A, B, C, D, E, F, G> = TupleProperty<(A, B, C, D, E, F, G)>;
pub type Tuple8Property<A, B, C, D, E, F, G, H> = TupleProperty<(A, B, C, D, E, F, G, H)>;
pub type Tuple9Property<A, B, C, D, E, F, G, H, I> = TupleProperty<(A, B, C, D, E, F, G, H, I)>;
pub type Tuple10Property<A, B, C, D, E, F, G, H, I, J> =
    TupleProperty<(A, B, C, D, E, F, G, H, I, J)>;

impl<C: TupleComponents> TupleProperty<C> {
    pub fn new(field: FieldInfo, components: C) -> Self {
        Self {
            field,
            components,
            tuple_type: OnceLock::new(),
        }
    }

    pub fn arity(&self) -> usize {
        C::ARITY
    }

    /// Assemble the composite type from the component descriptors.
    ///
    /// Always recomputes; [`TupleProperty::tuple_type`] returns the cached
    /// result.
    pub fn build_type(&self) -> TupleType {
        let tuple_type = TupleType::of(self.components.component_types());
        debug!(
            field = %self.field,
            arity = C::ARITY,
            data_type = %tuple_type,
            "Build tuple type"
        );
        tuple_type
    }

    pub fn tuple_type(&self) -> &TupleType {
        self.tuple_type.get_or_init(|| self.build_type())
    }

    /// Component properties in slot order
    pub fn components_property(&self) -> Vec<&dyn PropertyMeta> {
        self.components.components()
    }

    pub fn encode_composite(&self, value: &C::Value) -> Result<WireComposite> {
        let cells = self.components.encode_components(&self.field, value)?;
        self.tuple_type()
            .new_value(cells)
            .map_err(|e| e.into_encoding(&self.field))
    }

    /// Decode a wire composite, checking its arity before any slot is read
    pub fn decode_composite(&self, composite: &WireComposite) -> Result<C::Value> {
        let actual = composite.component_types().len();
        if actual != C::ARITY || composite.len() != C::ARITY {
            return Err(CodecError::ArityMismatch {
                field: self.field.field_name().to_string(),
                expected: C::ARITY,
                actual,
            });
        }
        self.components.decode_components(&self.field, composite)
    }
}

impl<C: TupleComponents> PropertyMeta for TupleProperty<C> {
    fn field_info(&self) -> &FieldInfo {
        &self.field
    }

    fn kind(&self) -> PropertyKind {
        PropertyKind::Tuple
    }

    fn data_type(&self) -> DataType {
        DataType::Tuple(self.tuple_type().clone())
    }

    fn components(&self) -> Vec<&dyn PropertyMeta> {
        self.components_property()
    }

    fn encode_raw(&self, raw: &dyn RawValue) -> Result<WireValue> {
        match raw.as_any().downcast_ref::<C::Value>() {
            Some(value) => self.encode(value),
            None => Err(CodecError::type_mismatch(
                &self.field,
                format!("{}-tuple {}", C::ARITY, std::any::type_name::<C::Value>()),
                raw.raw_type_name(),
            )),
        }
    }
}

impl<C: TupleComponents> Property for TupleProperty<C> {
    type Value = C::Value;

    fn encode(&self, value: &C::Value) -> Result<WireValue> {
        trace!(field = %self.field, value = ?value, "Encode tuple from value");
        self.encode_composite(value).map(WireValue::Tuple)
    }

    fn decode(&self, cell: &WireValue) -> Result<C::Value> {
        trace!(field = %self.field, cell = ?cell, "Decode tuple from wire");
        match cell {
            WireValue::Tuple(composite) => self.decode_composite(composite),
            other => Err(CodecError::decoding(
                &self.field,
                format!(
                    "expected a {}-tuple cell, got {}",
                    C::ARITY,
                    other.type_name()
                ),
            )),
        }
    }

    fn decode_raw(&self, raw: &dyn RawValue) -> Result<C::Value> {
        if let Some(composite) = raw.as_any().downcast_ref::<WireComposite>() {
            return self.decode_composite(composite);
        }
        let cell = expect_wire_cell(self, raw)?;
        self.decode(cell)
    }
}
