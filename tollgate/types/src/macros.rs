/// Build a [`Coins`](crate::Coins) from a list of `denom => amount` pairs.
///
/// Panics on duplicate denoms or amount overflow, so this is meant for
/// constants and tests where the inputs are known.
///
/// ```rust
/// use tollgate_types::{coins, Denom};
///
/// let fee = coins! {
///     Denom::new_unchecked("uatom") => 100,
///     Denom::new_unchecked("uosmo") => 50,
/// };
/// ```
#[macro_export]
macro_rules! coins {
    () => {
        $crate::Coins::new()
    };
    ($($denom:expr => $amount:expr),+ $(,)?) => {{
        let mut coins = $crate::Coins::new();
        $(
            coins
                .insert($crate::Coin::new($denom, $crate::Uint128::from($amount)))
                .unwrap_or_else(|err| panic!("{err}"));
        )+
        coins
    }};
}
