//! Test utilities for colcodec-core

#[cfg(test)]
pub mod test {
    use crate::codec::NativeCodec;
    use crate::property::{FieldInfo, ScalarProperty};
    use crate::schema::{DataType, TupleType, UserType};
    use crate::value::{Row, WireComposite, WireValue};

    pub type IntProperty = ScalarProperty<NativeCodec<i32>>;
    pub type TextProperty = ScalarProperty<NativeCodec<String>>;

    /// Int leaf whose column carries the field name
    pub fn int(name: &str) -> IntProperty {
        ScalarProperty::new(FieldInfo::of(name), NativeCodec::new())
    }

    /// Text leaf whose column carries the field name
    pub fn text(name: &str) -> TextProperty {
        ScalarProperty::new(FieldInfo::of(name), NativeCodec::new())
    }

    /// `tuple<int, list<text>>`
    pub fn sample_tuple_type() -> TupleType {
        TupleType::of([DataType::int(), DataType::list(DataType::text())])
    }

    /// `(1, ["1"])` under [`sample_tuple_type`]
    pub fn sample_composite() -> WireComposite {
        sample_tuple_type()
            .new_value(vec![
                WireValue::Int(1),
                WireValue::List(vec![WireValue::text("1")]),
            ])
            .unwrap()
    }

    /// `test_udt { name text, list list<text> }`
    pub fn sample_user_type() -> UserType {
        UserType::new(
            "test_udt",
            [
                ("name", DataType::text()),
                ("list", DataType::list(DataType::text())),
            ],
        )
    }

    /// One row holding the sample composite next to an id
    pub fn sample_row() -> Row {
        Row::new()
            .with_column("id", WireValue::BigInt(1))
            .with_column("tuple_nesting", WireValue::Tuple(sample_composite()))
            .with_column("value", WireValue::Null)
    }
}
