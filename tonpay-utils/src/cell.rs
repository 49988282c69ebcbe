use anyhow::Result;
use ton_types::{BuilderData, Cell, SliceData};

/// Appends bytes to the builder, continuing in a chain of child references
/// when the current cell has no room left
pub fn store_string_tail(builder: &mut BuilderData, data: &[u8]) -> Result<()> {
    if data.is_empty() {
        return Ok(());
    }

    let free_bytes = builder.bits_free() / 8;
    if data.len() <= free_bytes {
        builder.append_raw(data, data.len() * 8)?;
        return Ok(());
    }

    let (head, tail) = data.split_at(free_bytes);
    builder.append_raw(head, head.len() * 8)?;

    let mut child = BuilderData::new();
    store_string_tail(&mut child, tail)?;
    builder.checked_append_reference(child.into_cell()?)?;
    Ok(())
}

/// Reads all remaining bytes of the slice followed by its reference chain
pub fn load_string_tail(slice: &mut SliceData) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    loop {
        let bits = slice.remaining_bits();
        if bits % 8 != 0 {
            return Err(CellError::UnalignedStringTail.into());
        }
        data.extend_from_slice(&slice.get_next_bytes(bits / 8)?);

        match slice.remaining_references() {
            0 => break,
            1 => {
                let next = slice.checked_drain_reference()?;
                *slice = SliceData::load_cell(next)?;
            }
            _ => return Err(CellError::AmbiguousStringTail.into()),
        }
    }
    Ok(data)
}

/// Serializes the cell into a base64 encoded BOC
pub fn cell_to_base64(cell: &Cell) -> Result<String> {
    let bytes = ton_types::serialize_toc(cell)?;
    Ok(base64::encode(bytes))
}

/// Parses a base64 encoded BOC with a single root
pub fn cell_from_base64(boc: &str) -> Result<Cell> {
    let bytes = base64::decode(boc.trim()).map_err(|_| CellError::InvalidBase64)?;
    ton_types::deserialize_tree_of_cells(&mut bytes.as_slice())
}

#[derive(thiserror::Error, Debug, Copy, Clone)]
pub enum CellError {
    #[error("Invalid base64")]
    InvalidBase64,
    #[error("String tail is not byte aligned")]
    UnalignedStringTail,
    #[error("String tail has more than one continuation")]
    AmbiguousStringTail,
}
