use {
    data_encoding::BASE64,
    std::any::type_name,
    thiserror::Error,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StdError {
    #[error("addition overflow: {a} + {b}")]
    OverflowAdd { a: String, b: String },

    #[error("subtraction underflow: {a} - {b}")]
    OverflowSub { a: String, b: String },

    #[error("failed to parse number `{input}` into {ty}")]
    ParseNumber { ty: &'static str, input: String },

    #[error("invalid denom `{denom}`: {reason}")]
    InvalidDenom { denom: String, reason: &'static str },

    #[error("invalid coins: {reason}")]
    InvalidCoins { reason: String },

    #[error("invalid address `{input}`: {reason}")]
    InvalidAddress { input: String, reason: &'static str },

    #[error("invalid identifier `{value}`: {reason}")]
    InvalidIdentifier { value: String, reason: &'static str },

    #[error("invalid fee: {reason}")]
    InvalidFee { reason: String },

    #[error("data not found! type: {ty}, storage key: {key}")]
    DataNotFound { ty: &'static str, key: String },

    #[error("failed to serialize! codec: {codec}, type: {ty}, reason: {reason}")]
    Serialize {
        codec: &'static str,
        ty: &'static str,
        reason: String,
    },

    #[error("failed to deserialize! codec: {codec}, type: {ty}, reason: {reason}")]
    Deserialize {
        codec: &'static str,
        ty: &'static str,
        reason: String,
    },
}

impl StdError {
    pub fn overflow_add<T>(a: T, b: T) -> Self
    where
        T: ToString,
    {
        Self::OverflowAdd {
            a: a.to_string(),
            b: b.to_string(),
        }
    }

    pub fn overflow_sub<T>(a: T, b: T) -> Self
    where
        T: ToString,
    {
        Self::OverflowSub {
            a: a.to_string(),
            b: b.to_string(),
        }
    }

    pub fn parse_number<T, I>(input: I) -> Self
    where
        I: ToString,
    {
        Self::ParseNumber {
            ty: type_name::<T>(),
            input: input.to_string(),
        }
    }

    pub fn invalid_denom<D>(denom: D, reason: &'static str) -> Self
    where
        D: ToString,
    {
        Self::InvalidDenom {
            denom: denom.to_string(),
            reason,
        }
    }

    pub fn invalid_coins<R>(reason: R) -> Self
    where
        R: ToString,
    {
        Self::InvalidCoins {
            reason: reason.to_string(),
        }
    }

    pub fn invalid_address<I>(input: I, reason: &'static str) -> Self
    where
        I: ToString,
    {
        Self::InvalidAddress {
            input: input.to_string(),
            reason,
        }
    }

    pub fn invalid_identifier<V>(value: V, reason: &'static str) -> Self
    where
        V: ToString,
    {
        Self::InvalidIdentifier {
            value: value.to_string(),
            reason,
        }
    }

    pub fn invalid_fee<R>(reason: R) -> Self
    where
        R: ToString,
    {
        Self::InvalidFee {
            reason: reason.to_string(),
        }
    }

    pub fn data_not_found<T>(key: &[u8]) -> Self {
        Self::DataNotFound {
            ty: type_name::<T>(),
            key: BASE64.encode(key),
        }
    }

    pub fn serialize<T, R>(codec: &'static str, reason: R) -> Self
    where
        R: ToString,
    {
        Self::Serialize {
            codec,
            ty: type_name::<T>(),
            reason: reason.to_string(),
        }
    }

    pub fn deserialize<T, R>(codec: &'static str, reason: R) -> Self
    where
        R: ToString,
    {
        Self::Deserialize {
            codec,
            ty: type_name::<T>(),
            reason: reason.to_string(),
        }
    }
}

pub type StdResult<T> = core::result::Result<T, StdError>;
