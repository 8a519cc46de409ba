use {
    crate::{Addr, Coins, Denom, StdError, Uint128},
    thiserror::Error,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error(
        "insufficient balance! address: {address}, denom: {denom}, needed: {needed}, available: {available}"
    )]
    InsufficientBalance {
        address: Addr,
        denom: Denom,
        needed: Uint128,
        available: Uint128,
    },
}

pub type BankResult<T> = core::result::Result<T, BankError>;

/// The fungible-token ledger this engine moves money through.
///
/// Provided by the host chain; assumed trusted. Each `send` is atomic: it
/// either fully commits or fully rejects, there is no partial application of
/// a single call.
pub trait Bank {
    /// Move `coins` from one account to another. All-or-nothing across the
    /// coins of one call.
    fn send(&mut self, from: Addr, to: Addr, coins: &Coins) -> BankResult<()>;

    /// An account's balance in the given denom; zero if it holds none.
    fn balance(&self, address: Addr, denom: &Denom) -> Uint128;

    /// Whether the account is a reserved payout target.
    ///
    /// Module-internal accounts are always blocked, so that a mistyped or
    /// malicious recipient can't redirect fees into an account no one can
    /// withdraw from.
    fn is_blocked(&self, address: Addr) -> bool;
}
