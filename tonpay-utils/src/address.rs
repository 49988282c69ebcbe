use std::str::FromStr;

use anyhow::Result;
use base64::URL_SAFE;
use ton_block::{MsgAddrStd, MsgAddressInt};
use ton_types::AccountId;

use crate::crc::crc_16;

const TAG_BOUNCEABLE: u8 = 0x11;
const TAG_NON_BOUNCEABLE: u8 = 0x51;
const TAG_TESTNET: u8 = 0x80;

const PACKED_LEN: usize = 36;

/// Flags encoded into the first byte of a user-friendly address
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct AddressFlags {
    pub bounceable: bool,
    pub testnet: bool,
}

impl AddressFlags {
    pub const MAINNET_BOUNCEABLE: Self = Self {
        bounceable: true,
        testnet: false,
    };

    pub const MAINNET_NON_BOUNCEABLE: Self = Self {
        bounceable: false,
        testnet: false,
    };

    fn to_tag(self) -> u8 {
        let tag = if self.bounceable {
            TAG_BOUNCEABLE
        } else {
            TAG_NON_BOUNCEABLE
        };
        if self.testnet {
            tag | TAG_TESTNET
        } else {
            tag
        }
    }

    fn from_tag(tag: u8) -> Result<Self, AddressConversionError> {
        let bounceable = match tag & !TAG_TESTNET {
            TAG_BOUNCEABLE => true,
            TAG_NON_BOUNCEABLE => false,
            _ => return Err(AddressConversionError::InvalidTag),
        };
        Ok(Self {
            bounceable,
            testnet: tag & TAG_TESTNET != 0,
        })
    }
}

/// Packs std address into the user-friendly base64 form
/// # Arguments
/// `base64_url` - encode with url friendly charset or not
pub fn pack_std_smc_addr(
    base64_url: bool,
    addr: &MsgAddressInt,
    flags: AddressFlags,
) -> Result<String> {
    let addr = match addr {
        MsgAddressInt::AddrStd(addr) => addr,
        MsgAddressInt::AddrVar(_) => {
            return Err(AddressConversionError::UnsupportedAddressType.into())
        }
    };

    let mut buffer = [0u8; PACKED_LEN];
    buffer[0] = flags.to_tag();
    buffer[1] = addr.workchain_id as u8;
    buffer[2..34].copy_from_slice(&addr.address.get_bytestring(0)[0..32]);
    let crc = crc_16(&buffer[..34]);
    buffer[34..].copy_from_slice(&crc.to_be_bytes());

    Ok(if base64_url {
        base64::encode_config(buffer, URL_SAFE)
    } else {
        base64::encode(buffer)
    })
}

/// Unpacks user-friendly base64 address into std address and its flags
/// # Arguments
/// `base64_url` - decode with url friendly charset or not
pub fn unpack_std_smc_addr(
    packed: &str,
    base64_url: bool,
) -> Result<(MsgAddressInt, AddressFlags)> {
    let unpacked = if base64_url {
        base64::decode_config(packed, URL_SAFE)
    } else {
        base64::decode(packed)
    }
    .map_err(|_| AddressConversionError::InvalidBase64)?;

    if unpacked.len() != PACKED_LEN {
        return Err(AddressConversionError::InvalidPackedLength.into());
    }

    let crc = crc_16(&unpacked[..34]);
    if unpacked[34..] != crc.to_be_bytes() {
        return Err(AddressConversionError::InvalidChecksum.into());
    }

    let flags = AddressFlags::from_tag(unpacked[0])?;

    let address = &unpacked[2..34];
    let address = AccountId::from_raw(address.to_vec(), address.len() * 8);
    let address = MsgAddressInt::AddrStd(MsgAddrStd {
        workchain_id: unpacked[1] as i8,
        anycast: None,
        address,
    });
    Ok((address, flags))
}

pub fn validate_address(address: &str) -> bool {
    repack_address(address).is_ok()
}

/// Parses `address` in any of the raw, base64 or base64url encodings
pub fn repack_address(address: &str) -> Result<MsgAddressInt> {
    if let Ok(a) = MsgAddressInt::from_str(address) {
        return Ok(a);
    }
    if let Ok((a, _)) = unpack_std_smc_addr(address, true) {
        return Ok(a);
    }
    if let Ok((a, _)) = unpack_std_smc_addr(address, false) {
        return Ok(a);
    }
    Err(AddressConversionError::InvalidAddress.into())
}

#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum AddressConversionError {
    #[error("Unsupported address type")]
    UnsupportedAddressType,
    #[error("Invalid base64")]
    InvalidBase64,
    #[error("Invalid packed address length")]
    InvalidPackedLength,
    #[error("Invalid checksum")]
    InvalidChecksum,
    #[error("Invalid address tag")]
    InvalidTag,
    #[error("Invalid address")]
    InvalidAddress,
}
