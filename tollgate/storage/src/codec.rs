use {
    borsh::{BorshDeserialize, BorshSerialize},
    tollgate_types::{StdError, StdResult},
};

/// How a value is serialized into, and deserialized out of, raw storage bytes.
pub trait Codec<T> {
    fn encode(data: &T) -> StdResult<Vec<u8>>;

    fn decode(raw: &[u8]) -> StdResult<T>;
}

/// The default codec: Borsh. Compact, deterministic, and strict on decode.
pub struct Borsh;

impl<T> Codec<T> for Borsh
where
    T: BorshSerialize + BorshDeserialize,
{
    fn encode(data: &T) -> StdResult<Vec<u8>> {
        borsh::to_vec(data).map_err(|err| StdError::serialize::<T, _>("borsh", err))
    }

    fn decode(raw: &[u8]) -> StdResult<T> {
        borsh::from_slice(raw).map_err(|err| StdError::deserialize::<T, _>("borsh", err))
    }
}
