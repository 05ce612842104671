pub mod error;
pub mod types;
pub mod encoding;

pub use error::CoreError;
pub use types::{Address, ChannelId, Entry, Hash, H256, NATIVE_TOKEN, U256, ZERO_HASH};
pub use encoding::{hash_to_hex, parse_address, parse_amount, parse_hash, ChecksumAddress, DecimalAmount};
