use {
    thiserror::Error,
    tollgate_types::{BankError, StdError},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeeError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error("fee engine is locked; escrow and distribution are disabled pending governance")]
    Locked,

    #[error("escrow account cannot cover the requested distribution")]
    EscrowOutOfBalance(#[source] BankError),
}

pub type FeeResult<T> = core::result::Result<T, FeeError>;
