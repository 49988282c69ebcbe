use num_bigint::BigUint;
use ton_block::{Deserializable, Grams, MsgAddressInt};
use ton_types::{Cell, SliceData};
use tonpay_utils::load_string_tail;

use super::comment::COMMENT_TAG;
use super::jetton_wallet::JETTON_TRANSFER_OPCODE;
use super::models::*;
use super::nft_wallet::NFT_TRANSFER_OPCODE;

pub fn parse_comment_payload(cell: &Cell) -> Option<String> {
    parse_comment_slice(SliceData::load_cell_ref(cell).ok()?)
}

pub fn parse_comment_slice(mut payload: SliceData) -> Option<String> {
    if payload.get_next_u32().ok()? != COMMENT_TAG {
        return None;
    }

    let data = load_string_tail(&mut payload).ok()?;
    String::from_utf8(data).ok()
}

pub fn parse_jetton_transfer_payload(cell: &Cell) -> Option<JettonTransferPayload> {
    let mut payload = SliceData::load_cell_ref(cell).ok()?;

    let opcode = payload.get_next_u32().ok()?;
    if opcode != JETTON_TRANSFER_OPCODE {
        return None;
    }

    let query_id = payload.get_next_u64().ok()?;
    let amount = Grams::construct_from(&mut payload).ok()?;
    let destination = MsgAddressInt::construct_from(&mut payload).ok()?;
    let response_destination = MsgAddressInt::construct_from(&mut payload).ok()?;
    let custom_payload = read_maybe_ref(&mut payload)?;
    let forward_ton_amount = Grams::construct_from(&mut payload).ok()?;
    let forward_payload = read_forward_payload(payload)?;

    Some(JettonTransferPayload {
        query_id,
        amount: BigUint::from(amount.as_u128()),
        destination,
        response_destination,
        custom_payload,
        forward_ton_amount: forward_ton_amount.as_u128(),
        forward_payload,
    })
}

pub fn parse_nft_transfer_payload(cell: &Cell) -> Option<NftTransferPayload> {
    let mut payload = SliceData::load_cell_ref(cell).ok()?;

    let opcode = payload.get_next_u32().ok()?;
    if opcode != NFT_TRANSFER_OPCODE {
        return None;
    }

    let query_id = payload.get_next_u64().ok()?;
    let new_owner = MsgAddressInt::construct_from(&mut payload).ok()?;
    let response_destination = MsgAddressInt::construct_from(&mut payload).ok()?;
    let custom_payload = read_maybe_ref(&mut payload)?;
    let forward_amount = Grams::construct_from(&mut payload).ok()?;
    let forward_payload = read_forward_payload(payload)?;

    Some(NftTransferPayload {
        query_id,
        new_owner,
        response_destination,
        custom_payload,
        forward_amount: forward_amount.as_u128(),
        forward_payload,
    })
}

fn read_maybe_ref(payload: &mut SliceData) -> Option<Option<Cell>> {
    if payload.get_next_bit().ok()? {
        payload.checked_drain_reference().ok().map(Some)
    } else {
        Some(None)
    }
}

fn read_forward_payload(mut payload: SliceData) -> Option<ForwardPayload> {
    if !payload.get_next_bit().ok()? {
        return Some(ForwardPayload::Inline(payload));
    }

    let cell = payload.checked_drain_reference().ok()?;
    if payload.remaining_bits() != 0 || payload.remaining_references() != 0 {
        return None;
    }
    Some(ForwardPayload::Ref(cell))
}
