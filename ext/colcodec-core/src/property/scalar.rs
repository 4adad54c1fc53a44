use super::{downcast_raw, FieldInfo, Property, PropertyKind, PropertyMeta, RawValue};
use crate::codec::ScalarCodec;
use crate::error::{CodecError, Result};
use crate::schema::DataType;
use crate::value::WireValue;
use tracing::trace;

/// Leaf property: one scalar value through a [`ScalarCodec`]
#[derive(Debug, Clone)]
pub struct ScalarProperty<C> {
    field: FieldInfo,
    codec: C,
}

impl<C: ScalarCodec> ScalarProperty<C> {
    pub fn new(field: FieldInfo, codec: C) -> Self {
        Self { field, codec }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }
}

impl<C: ScalarCodec> PropertyMeta for ScalarProperty<C> {
    fn field_info(&self) -> &FieldInfo {
        &self.field
    }

    fn kind(&self) -> PropertyKind {
        PropertyKind::Scalar
    }

    fn data_type(&self) -> DataType {
        self.codec.data_type()
    }

    fn encode_raw(&self, raw: &dyn RawValue) -> Result<WireValue> {
        trace!(field = %self.field, raw_type = raw.raw_type_name(), "Encode raw scalar");
        self.encode(downcast_raw(self, raw)?)
    }
}

impl<C: ScalarCodec> Property for ScalarProperty<C> {
    type Value = C::Value;

    fn encode(&self, value: &C::Value) -> Result<WireValue> {
        trace!(field = %self.field, value = ?value, "Encode scalar from value");
        self.codec
            .encode(value)
            .map_err(|e| e.into_encoding(&self.field))
    }

    fn decode(&self, cell: &WireValue) -> Result<C::Value> {
        trace!(field = %self.field, cell = ?cell, "Decode scalar from wire");
        if cell.is_null() {
            return Err(CodecError::decoding(&self.field, "unexpected null cell"));
        }
        self.codec
            .decode(cell)
            .map_err(|e| e.into_decoding(&self.field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::NativeCodec;
    use crate::error::ErrorKind;

    fn int_property() -> ScalarProperty<NativeCodec<i32>> {
        ScalarProperty::new(FieldInfo::of("integer"), NativeCodec::new())
    }

    #[test]
    fn test_scalar_roundtrip() {
        let property = int_property();
        let cell = property.encode(&123).unwrap();
        assert_eq!(cell, WireValue::Int(123));
        assert_eq!(property.decode(&cell).unwrap(), 123);
        assert_eq!(property.data_type(), DataType::int());
        assert!(property.components().is_empty());
    }

    #[test]
    fn test_scalar_null_handling() {
        let property = int_property();
        let err = property.decode(&WireValue::Null).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decoding);

        assert_eq!(property.decode_optional(&WireValue::Null).unwrap(), None);
        assert_eq!(property.encode_optional(None).unwrap(), WireValue::Null);
    }

    #[test]
    fn test_scalar_codec_error_gets_field() {
        let property = int_property();
        let err = property.decode(&WireValue::text("123")).unwrap_err();
        match err {
            CodecError::Decoding { field, .. } => assert_eq!(field, "integer"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_scalar_raw_paths() {
        let property = int_property();
        assert_eq!(property.encode_raw(&7i32).unwrap(), WireValue::Int(7));

        let err = property.encode_raw(&7i64).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert!(err.to_string().contains("i64"));

        assert_eq!(property.decode_raw(&WireValue::Int(9)).unwrap(), 9);
        let err = property.decode_raw(&WireValue::List(vec![])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }
}
