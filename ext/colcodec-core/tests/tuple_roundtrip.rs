use colcodec_core::codec::{EnumCodec, JsonCodec};
use colcodec_core::property::{ListProperty, ScalarProperty};
use colcodec_core::*;

mod test_helpers;
use test_helpers::*;

fn ints<const N: usize>(config: &CodecConfig, name: &str) -> [IntProperty; N] {
    std::array::from_fn(|_| config.native::<i32>(name))
}

#[test]
fn test_every_arity_roundtrips() {
    init_tracing();
    let config = entity_config();

    let [a] = ints::<1>(&config, "tuple1");
    let property = config.tuple("tuple1", (a,));
    assert_eq!(roundtrip(&property, &(1,)), (1,));

    let [a, b] = ints::<2>(&config, "tuple2");
    let property = config.tuple("tuple2", (a, b));
    assert_eq!(roundtrip(&property, &(1, 2)), (1, 2));

    let [a, b, c] = ints::<3>(&config, "tuple3");
    let property = config.tuple("tuple3", (a, b, c));
    assert_eq!(roundtrip(&property, &(1, 2, 3)), (1, 2, 3));

    let [a, b, c, d] = ints::<4>(&config, "tuple4");
    let property = config.tuple("tuple4", (a, b, c, d));
    assert_eq!(roundtrip(&property, &(1, 2, 3, 4)), (1, 2, 3, 4));

    let [a, b, c, d, e] = ints::<5>(&config, "tuple5");
    let property = config.tuple("tuple5", (a, b, c, d, e));
    assert_eq!(roundtrip(&property, &(1, 2, 3, 4, 5)), (1, 2, 3, 4, 5));

    let [a, b, c, d, e, f] = ints::<6>(&config, "tuple6");
    let property = config.tuple("tuple6", (a, b, c, d, e, f));
    assert_eq!(roundtrip(&property, &(1, 2, 3, 4, 5, 6)), (1, 2, 3, 4, 5, 6));

    let [a, b, c, d, e, f, g] = ints::<7>(&config, "tuple7");
    let property = config.tuple("tuple7", (a, b, c, d, e, f, g));
    assert_eq!(
        roundtrip(&property, &(1, 2, 3, 4, 5, 6, 7)),
        (1, 2, 3, 4, 5, 6, 7)
    );

    let [a, b, c, d, e, f, g, h] = ints::<8>(&config, "tuple8");
    let property = config.tuple("tuple8", (a, b, c, d, e, f, g, h));
    assert_eq!(
        roundtrip(&property, &(1, 2, 3, 4, 5, 6, 7, 8)),
        (1, 2, 3, 4, 5, 6, 7, 8)
    );

    let [a, b, c, d, e, f, g, h, i] = ints::<9>(&config, "tuple9");
    let property = config.tuple("tuple9", (a, b, c, d, e, f, g, h, i));
    assert_eq!(
        roundtrip(&property, &(1, 2, 3, 4, 5, 6, 7, 8, 9)),
        (1, 2, 3, 4, 5, 6, 7, 8, 9)
    );

    let [a, b, c, d, e, f, g, h, i, j] = ints::<10>(&config, "tuple10");
    let property = config.tuple("tuple10", (a, b, c, d, e, f, g, h, i, j));
    assert_eq!(property.arity(), 10);
    assert_eq!(
        roundtrip(&property, &(1, 2, 3, 4, 5, 6, 7, 8, 9, 10)),
        (1, 2, 3, 4, 5, 6, 7, 8, 9, 10)
    );
}

#[test]
fn test_enum_and_int_pair() {
    init_tracing();
    let config = entity_config();
    let property = config.tuple(
        "tuple2",
        (
            config.enumeration::<ConsistencyLevel>("tuple2"),
            config.native::<i32>("tuple2"),
        ),
    );
    assert_eq!(property.data_type().to_string(), "tuple<text, int>");

    let cell = property.encode(&(ConsistencyLevel::Two, 2)).unwrap();
    match &cell {
        WireValue::Tuple(composite) => {
            assert_eq!(composite.get(0), Some(&WireValue::text("TWO")));
            assert_eq!(composite.get(1), Some(&WireValue::Int(2)));
        }
        other => panic!("expected tuple cell, got {other:?}"),
    }
    assert_eq!(property.decode(&cell).unwrap(), (ConsistencyLevel::Two, 2));
}

#[test]
fn test_json_encoded_single() {
    let config = entity_config();
    let property = config.tuple(
        "tuple1",
        (config.scalar("tuple1", JsonCodec::<ConsistencyLevel>::new()),),
    );

    let cell = property.encode(&(ConsistencyLevel::Three,)).unwrap();
    match &cell {
        WireValue::Tuple(composite) => {
            assert_eq!(composite.values(), &[WireValue::text("\"THREE\"")]);
        }
        other => panic!("expected tuple cell, got {other:?}"),
    }
    assert_eq!(property.decode(&cell).unwrap(), (ConsistencyLevel::Three,));
}

#[test]
fn test_ordinal_encoded_enum() {
    let config = CodecConfig::builder()
        .with_enum_encoding(EnumEncoding::Ordinal)
        .build();
    let property = config.tuple(
        "levels",
        (
            config.enumeration::<ConsistencyLevel>("levels"),
            config.enumeration::<ConsistencyLevel>("levels"),
        ),
    );
    assert_eq!(property.data_type().to_string(), "tuple<int, int>");

    let value = (ConsistencyLevel::One, ConsistencyLevel::All);
    let cell = property.encode(&value).unwrap();
    match &cell {
        WireValue::Tuple(composite) => {
            assert_eq!(composite.values(), &[WireValue::Int(0), WireValue::Int(5)]);
        }
        other => panic!("expected tuple cell, got {other:?}"),
    }
    assert_eq!(property.decode(&cell).unwrap(), value);
}

#[test]
fn test_tenth_tuple_ninth_slot_reads_index_eight() {
    let config = entity_config();
    let property = config.tuple(
        "tuple10",
        (
            config.native::<i32>("tuple10"),
            config.native::<i32>("tuple10"),
            config.native::<i32>("tuple10"),
            config.native::<i32>("tuple10"),
            config.native::<i32>("tuple10"),
            config.native::<i32>("tuple10"),
            config.native::<i32>("tuple10"),
            config.native::<i64>("tuple10"),
            config.native::<String>("tuple10"),
            config.native::<bool>("tuple10"),
        ),
    );

    let value = (0, 1, 2, 3, 4, 5, 6, 7i64, "eight".to_string(), true);
    let composite = property.encode_composite(&value).unwrap();
    assert_eq!(composite.get(7), Some(&WireValue::BigInt(7)));
    assert_eq!(composite.get(8), Some(&WireValue::text("eight")));

    let decoded = property.decode_composite(&composite).unwrap();
    assert_eq!(decoded.7, 7);
    assert_eq!(decoded.8, "eight");
    assert_eq!(decoded, value);
}

#[test]
fn test_positions_are_significant() {
    let config = entity_config();
    let property = config.tuple(
        "pair",
        (config.native::<i32>("pair"), config.native::<i32>("pair")),
    );

    let forward = property.encode(&(1, 2)).unwrap();
    let swapped = property.encode(&(2, 1)).unwrap();
    assert_ne!(forward, swapped);
    assert_eq!(property.decode(&swapped).unwrap(), (2, 1));
}

#[test]
fn test_tuple_of_tuple() {
    let config = entity_config();
    let inner = config.tuple(
        "nested",
        (config.native::<String>("nested"), config.native::<i32>("nested")),
    );
    let property = config.tuple("nested", (config.native::<i32>("nested"), inner));
    assert_eq!(
        property.data_type().to_string(),
        "tuple<int, tuple<text, int>>"
    );

    let value = (1, ("one".to_string(), 1));
    assert_eq!(roundtrip(&property, &value), value);
}

#[test]
fn test_tuple_nesting_list() {
    let config = entity_config();
    let property = config.tuple(
        "tupleNesting",
        (
            config.native::<i32>("tupleNesting"),
            ListProperty::new(
                config.field("tupleNesting"),
                config.native::<String>("tupleNesting"),
            ),
        ),
    );
    assert_eq!(property.field_info().cql_column(), "tuple_nesting");

    let value = (1, vec!["1".to_string()]);
    assert_eq!(roundtrip(&property, &value), value);
}

#[test]
fn test_enum_codec_direct_construction() {
    let property = TupleProperty::new(
        FieldInfo::of("tuple1"),
        (ScalarProperty::new(
            FieldInfo::of("tuple1"),
            EnumCodec::<ConsistencyLevel>::new(EnumEncoding::Name),
        ),),
    );
    assert_eq!(
        roundtrip(&property, &(ConsistencyLevel::LocalQuorum,)),
        (ConsistencyLevel::LocalQuorum,)
    );
}
