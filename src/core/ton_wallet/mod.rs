use ton_types::Cell;

use crate::models::TransactionMessage;

/// Plain native coin transfer with an optional body
pub fn prepare_transfer(address: &str, amount: u64, body: Option<Cell>) -> TransactionMessage {
    TransactionMessage {
        address: address.to_owned(),
        amount,
        payload: body,
    }
}
