use super::extract::{decode_component, encode_component};
use crate::error::Result;
use crate::property::{FieldInfo, Property, PropertyMeta};
use crate::schema::DataType;
use crate::value::{WireComposite, WireValue};
use std::fmt;

/// An ordered, fixed-length group of component properties.
///
/// Implemented for native tuples of one to ten properties. Slot `i` of the
/// value is always handled by component `i`.
pub trait TupleComponents: Send + Sync {
    type Value: fmt::Debug + Send + 'static;

    const ARITY: usize;

    /// Component descriptors in slot order
    fn component_types(&self) -> Vec<DataType>;

    fn encode_components(&self, field: &FieldInfo, value: &Self::Value) -> Result<Vec<WireValue>>;

    /// Decode every slot. The composite's arity is checked by the caller.
    fn decode_components(
        &self,
        field: &FieldInfo,
        composite: &WireComposite,
    ) -> Result<Self::Value>;

    fn components(&self) -> Vec<&dyn PropertyMeta>;
}

macro_rules! count_args {
    () => { 0 };
    ($head:ident $(, $tail:ident)*) => { 1 + count_args!($($tail),*) };
}

// The same `$idx` token selects the value slot and the wire position
macro_rules! impl_tuple_components {
    ($($P:ident: $idx:tt),+) => {
        impl<$($P: Property),+> TupleComponents for ($($P,)+) {
            type Value = ($($P::Value,)+);

            const ARITY: usize = count_args!($($P),+);

            fn component_types(&self) -> Vec<DataType> {
                vec![$(self.$idx.data_type()),+]
            }

            fn encode_components(
                &self,
                field: &FieldInfo,
                value: &Self::Value,
            ) -> Result<Vec<WireValue>> {
                Ok(vec![$(encode_component(field, $idx, &self.$idx, &value.$idx)?),+])
            }

            fn decode_components(
                &self,
                field: &FieldInfo,
                composite: &WireComposite,
            ) -> Result<Self::Value> {
                Ok(($(decode_component(field, $idx, &self.$idx, composite)?,)+))
            }

            fn components(&self) -> Vec<&dyn PropertyMeta> {
                vec![$(&self.$idx as &dyn PropertyMeta),+]
            }
        }
    };
}

impl_tuple_components!(P0: 0);
impl_tuple_components!(P0: 0, P1: 1);
impl_tuple_components!(P0: 0, P1: 1, P2: 2);
impl_tuple_components!(P0: 0, P1: 1, P2: 2, P3: 3);
impl_tuple_components!(P0: 0, P1: 1, P2: 2, P3: 3, P4: 4);
impl_tuple_components!(P0: 0, P1: 1, P2: 2, P3: 3, P4: 4, P5: 5);
impl_tuple_components!(P0: 0, P1: 1, P2: 2, P3: 3, P4: 4, P5: 5, P6: 6);
impl_tuple_components!(P0: 0, P1: 1, P2: 2, P3: 3, P4: 4, P5: 5, P6: 6, P7: 7);
impl_tuple_components!(P0: 0, P1: 1, P2: 2, P3: 3, P4: 4, P5: 5, P6: 6, P7: 7, P8: 8);
impl_tuple_components!(P0: 0, P1: 1, P2: 2, P3: 3, P4: 4, P5: 5, P6: 6, P7: 7, P8: 8, P9: 9);
