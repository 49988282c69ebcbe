use anyhow::Result;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use ton_block::{MsgAddressInt, Serializable};
use ton_types::{BuilderData, Cell, IBitstring};

use super::TransferError;

pub const JETTON_TRANSFER_OPCODE: u32 = 0x0f8a7ea5;

/// Builds the body of a jetton `transfer` message, which is sent by the owner
/// to its own jetton wallet.
///
/// The receiving contract parses the fields in this exact order, flags included
pub fn build_transfer_payload(
    query_id: u64,
    amount: &BigUint,
    destination: &MsgAddressInt,
    response_destination: &MsgAddressInt,
    custom_payload: Option<Cell>,
    forward_ton_amount: u64,
    forward_payload: Option<Cell>,
) -> Result<Cell> {
    let mut builder = BuilderData::new();

    // Opcode
    builder.append_u32(JETTON_TRANSFER_OPCODE)?;

    // Query id
    builder.append_u64(query_id)?;

    // Amount
    // Coins are limited to 120 bits, which is narrower than u128
    let grams = amount
        .to_u128()
        .and_then(|amount| ton_block::Grams::new(amount).ok())
        .ok_or(TransferError::TryFromGrams)?;
    grams.write_to(&mut builder)?;

    // Recipient
    destination.write_to(&mut builder)?;

    // Response destination
    response_destination.write_to(&mut builder)?;

    // Optional(TvmCell)
    match custom_payload {
        Some(payload) => {
            builder.append_bit_one()?;
            builder.checked_append_reference(payload)?;
        }
        None => {
            builder.append_bit_zero()?;
        }
    }

    // Forward value
    ton_block::Grams::new(forward_ton_amount as u128)?.write_to(&mut builder)?;

    // Either Cell ^Cell
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

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use ton_block::{Deserializable, Grams};
    use ton_types::SliceData;

    use super::*;
    use crate::core::comment::Comment;
    use crate::core::parsing::parse_jetton_transfer_payload;

    const RECIPIENT: &str = "0:17fb7072fe2c937effb96e657d188de3baf5a51550986874b62c6da8ce364862";
    const OWNER: &str = "0:02e3f2284e68a8106b823ab9f2404f33cc43fccad8e1de835bdd96789254686c";

    fn addr(address: &str) -> MsgAddressInt {
        MsgAddressInt::from_str(address).unwrap()
    }

    #[test]
    fn fields_in_order() {
        let comment = Comment::new("test").unwrap();
        let cell = build_transfer_payload(
            0,
            &BigUint::from(1_000_000_000u64),
            &addr(RECIPIENT),
            &addr(OWNER),
            None,
            20_000_000,
            Some(comment.cell().clone()),
        )
        .unwrap();

        assert_eq!(cell.references_count(), 1);

        let mut slice = SliceData::load_cell_ref(&cell).unwrap();
        assert_eq!(slice.get_next_u32().unwrap(), 0xf8a7ea5);
        assert_eq!(slice.get_next_u64().unwrap(), 0);
        assert_eq!(
            Grams::construct_from(&mut slice).unwrap().as_u128(),
            1_000_000_000
        );
        assert_eq!(
            MsgAddressInt::construct_from(&mut slice).unwrap(),
            addr(RECIPIENT)
        );
        assert_eq!(
            MsgAddressInt::construct_from(&mut slice).unwrap(),
            addr(OWNER)
        );
        assert!(!slice.get_next_bit().unwrap());
        assert_eq!(
            Grams::construct_from(&mut slice).unwrap().as_u128(),
            20_000_000
        );
        assert!(slice.get_next_bit().unwrap());
        assert_eq!(slice.remaining_bits(), 0);

        let forward = slice.checked_drain_reference().unwrap();
        assert_eq!(forward.repr_hash(), comment.cell().repr_hash());
        assert_eq!(slice.remaining_references(), 0);
    }

    #[test]
    fn custom_payload_takes_first_ref() {
        let custom = Comment::new("custom").unwrap();
        let forward = Comment::new("forward").unwrap();

        let cell = build_transfer_payload(
            42,
            &BigUint::from(5u8),
            &addr(RECIPIENT),
            &addr(OWNER),
            Some(custom.cell().clone()),
            0,
            Some(forward.cell().clone()),
        )
        .unwrap();
        assert_eq!(cell.references_count(), 2);

        let payload = parse_jetton_transfer_payload(&cell).unwrap();
        assert_eq!(payload.query_id, 42);
        assert_eq!(payload.amount, BigUint::from(5u8));
        assert_eq!(
            payload.custom_payload.unwrap().repr_hash(),
            custom.cell().repr_hash()
        );
        assert_eq!(payload.forward_ton_amount, 0);
        assert_eq!(payload.forward_payload.comment().as_deref(), Some("forward"));
    }

    #[test]
    fn empty_forward_payload() {
        let cell = build_transfer_payload(
            0,
            &BigUint::from(1u8),
            &addr(RECIPIENT),
            &addr(OWNER),
            None,
            0,
            None,
        )
        .unwrap();
        assert_eq!(cell.references_count(), 0);

        let payload = parse_jetton_transfer_payload(&cell).unwrap();
        assert!(payload.forward_payload.is_empty());
    }

    #[test]
    fn amount_overflow() {
        let too_wide = BigUint::from(1u8) << 120;
        for amount in [too_wide, BigUint::from(u128::MAX), BigUint::from(u128::MAX) + 1u8] {
            let err = build_transfer_payload(
                0,
                &amount,
                &addr(RECIPIENT),
                &addr(OWNER),
                None,
                0,
                None,
            )
            .unwrap_err();
            assert!(matches!(
                err.downcast_ref::<TransferError>(),
                Some(TransferError::TryFromGrams)
            ));
        }
    }

    #[test]
    fn max_coins_amount() {
        let amount = (BigUint::from(1u8) << 120) - 1u8;
        let cell = build_transfer_payload(
            0,
            &amount,
            &addr(RECIPIENT),
            &addr(OWNER),
            None,
            0,
            None,
        )
        .unwrap();

        let payload = parse_jetton_transfer_payload(&cell).unwrap();
        assert_eq!(payload.amount, amount);
    }
}
