use anyhow::Result;
use ton_block::{Grams, MsgAddressInt, Serializable};
use ton_types::{BuilderData, Cell, IBitstring};

pub const NFT_TRANSFER_OPCODE: u32 = 0x5fcc3d14;

/// Builds the body of an NFT item `transfer` message, sent by the current
/// owner directly to the item contract
pub fn build_transfer_payload(
    query_id: u64,
    new_owner: &MsgAddressInt,
    response_destination: &MsgAddressInt,
    custom_payload: Option<Cell>,
    forward_amount: u64,
    forward_payload: Option<Cell>,
) -> Result<Cell> {
    let mut builder = BuilderData::new();

    builder.append_u32(NFT_TRANSFER_OPCODE)?;
    builder.append_u64(query_id)?;

    new_owner.write_to(&mut builder)?;
    response_destination.write_to(&mut builder)?;

    match custom_payload {
        Some(payload) => {
            builder.append_bit_one()?;
            builder.checked_append_reference(payload)?;
        }
        None => {
            builder.append_bit_zero()?;
        }
    }

    Grams::new(forward_amount as u128)?.write_to(&mut builder)?;

    match forward_payload {
        Some(payload) => {
            builder.append_bit_one()?;
            builder.checked_append_reference(payload)?;
        }
        None => {
            builder.append_bit_zero()?;
        }
    }

    builder.into_cell()
}
