use num_bigint::BigUint;
use ton_block::MsgAddressInt;
use ton_types::{Cell, SliceData};

use super::parsing::{parse_comment_payload, parse_comment_slice};

/// Decoded body of a jetton `transfer` message
#[derive(Clone, Debug)]
pub struct JettonTransferPayload {
    pub query_id: u64,
    pub amount: BigUint,
    pub destination: MsgAddressInt,
    pub response_destination: MsgAddressInt,
    pub custom_payload: Option<Cell>,
    pub forward_ton_amount: u128,
    pub forward_payload: ForwardPayload,
}

/// Decoded body of an NFT item `transfer` message
#[derive(Clone, Debug)]
pub struct NftTransferPayload {
    pub query_id: u64,
    pub new_owner: MsgAddressInt,
    pub response_destination: MsgAddressInt,
    pub custom_payload: Option<Cell>,
    pub forward_amount: u128,
    pub forward_payload: ForwardPayload,
}

/// `Either Cell ^Cell` tail of a transfer body
#[derive(Clone, Debug)]
pub enum ForwardPayload {
    Inline(SliceData),
    Ref(Cell),
}

impl ForwardPayload {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Inline(slice) => slice.remaining_bits() == 0 && slice.remaining_references() == 0,
            Self::Ref(_) => false,
        }
    }

    /// Text of the forwarded comment, if the payload is one
    pub fn comment(&self) -> Option<String> {
        match self {
            Self::Inline(slice) => parse_comment_slice(slice.clone()),
            Self::Ref(cell) => parse_comment_payload(cell),
        }
    }
}
