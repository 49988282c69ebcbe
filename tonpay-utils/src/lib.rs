pub use self::address::*;
pub use self::cell::*;
pub use self::clock::*;
pub use self::serde_helpers::*;
pub use self::traits::*;

mod address;
mod cell;
mod clock;
mod crc;
mod serde_helpers;
mod traits;
