use crate::error::{CodecError, Result};
use crate::property::{FieldInfo, Property, PropertyMeta};
use crate::value::{WireComposite, WireValue};
use tracing::trace;

/// Extract the cell at `position` of a wire composite and validate it.
///
/// The store's declared type for the slot must equal the descriptor of the
/// component property reading it, and the cell must conform to that type.
pub fn extract_component<'a, P: PropertyMeta + ?Sized>(
    field: &FieldInfo,
    position: usize,
    property: &P,
    composite: &'a WireComposite,
) -> Result<&'a WireValue> {
    let slot = (
        composite.get(position),
        composite.component_types().get(position),
    );
    let (cell, declared) = match slot {
        (Some(cell), Some(declared)) => (cell, declared),
        _ => {
            return Err(CodecError::decoding(
                field,
                format!(
                    "no component at position {} in a composite of {}",
                    position,
                    composite.len()
                ),
            ))
        }
    };

    let mapped = property.data_type();
    if *declared != mapped {
        return Err(CodecError::SchemaMismatch {
            field: field.field_name().to_string(),
            position,
            expected: mapped,
            actual: declared.clone(),
        });
    }

    if !cell.conforms_to(declared) {
        return Err(CodecError::decoding(
            field,
            format!(
                "component {} holds a {} cell, which is not a valid {}",
                position,
                cell.type_name(),
                declared
            ),
        ));
    }

    trace!(field = %field, position, data_type = %declared, "Extracted tuple component");
    Ok(cell)
}

pub(crate) fn encode_component<P: Property>(
    field: &FieldInfo,
    position: usize,
    property: &P,
    value: &P::Value,
) -> Result<WireValue> {
    property
        .encode(value)
        .map_err(|e| CodecError::component_encoding(field, position, e))
}

pub(crate) fn decode_component<P: Property>(
    field: &FieldInfo,
    position: usize,
    property: &P,
    composite: &WireComposite,
) -> Result<P::Value> {
    let cell = extract_component(field, position, property, composite)?;
    property
        .decode(cell)
        .map_err(|e| CodecError::component_decoding(field, position, e))
}
