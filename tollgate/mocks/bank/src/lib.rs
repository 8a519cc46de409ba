//! An in-memory fungible-token ledger implementing the [`Bank`] port, for
//! testing the fee engine against.

use {
    std::collections::BTreeSet,
    tollgate_storage::Map,
    tollgate_types::{
        Addr, Bank, BankError, BankResult, Coin, Coins, Denom, MockStorage, Order, StdResult,
        Uint128,
    },
};

const BALANCES: Map<(Addr, &Denom), Uint128> = Map::new("balance");

/// A storage-backed ledger double. Transfers are all-or-nothing across the
/// coins of one call, matching what the real ledger guarantees.
#[derive(Default, Clone)]
pub struct MockBank {
    storage: MockStorage,
    blocked: BTreeSet<Addr>,
}

impl MockBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an address as a reserved payout target, the way module-internal
    /// accounts are on a real chain.
    pub fn block(&mut self, address: Addr) {
        self.blocked.insert(address);
    }

    /// Credit an account out of thin air. Test setup only; a real ledger
    /// would never offer this without gatekeeping.
    pub fn mint(&mut self, to: Addr, coins: &Coins) -> StdResult<()> {
        for coin in coins {
            self.increase_balance(to, coin.denom, *coin.amount)?;
        }

        Ok(())
    }

    /// Every non-zero balance the account holds.
    pub fn balances(&self, address: Addr) -> StdResult<Coins> {
        BALANCES
            .prefix(address)
            .range(&self.storage, Order::Ascending)
            .map(|record| record.map(|(denom, amount)| Coin::new(denom, amount)))
            .collect::<StdResult<Vec<_>>>()?
            .try_into()
    }

    fn increase_balance(&mut self, address: Addr, denom: &Denom, amount: Uint128) -> StdResult<()> {
        BALANCES.may_modify(&mut self.storage, (address, denom), |balance| {
            let balance = balance.unwrap_or(Uint128::ZERO).checked_add(amount)?;
            // Only write a record if the balance is non-zero.
            if balance.is_zero() {
                Ok(None)
            } else {
                Ok(Some(balance))
            }
        })?;

        Ok(())
    }

    fn decrease_balance(&mut self, address: Addr, denom: &Denom, amount: Uint128) -> BankResult<()> {
        BALANCES.may_modify(&mut self.storage, (address, denom), |balance| {
            let available = balance.unwrap_or(Uint128::ZERO);

            if available < amount {
                return Err(BankError::InsufficientBalance {
                    address,
                    denom: denom.clone(),
                    needed: amount,
                    available,
                });
            }

            // If the balance is drained to zero, delete the record.
            let remaining = available.checked_sub(amount)?;
            if remaining.is_zero() {
                Ok(None)
            } else {
                Ok(Some(remaining))
            }
        })?;

        Ok(())
    }
}

impl Bank for MockBank {
    fn send(&mut self, from: Addr, to: Addr, coins: &Coins) -> BankResult<()> {
        // Check every coin before moving any, so a failed send leaves no
        // partial application behind.
        for coin in coins {
            let available = self.balance(from, coin.denom);
            if available < *coin.amount {
                return Err(BankError::InsufficientBalance {
                    address: from,
                    denom: coin.denom.clone(),
                    needed: *coin.amount,
                    available,
                });
            }
        }

        for coin in coins {
            self.decrease_balance(from, coin.denom, *coin.amount)?;
            self.increase_balance(to, coin.denom, *coin.amount)?;
        }

        Ok(())
    }

    fn balance(&self, address: Addr, denom: &Denom) -> Uint128 {
        BALANCES
            .may_load(&self.storage, (address, denom))
            .unwrap_or_default()
            .unwrap_or(Uint128::ZERO)
    }

    fn is_blocked(&self, address: Addr) -> bool {
        self.blocked.contains(&address)
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        tollgate_types::{coins, ResultExt},
    };

    fn atom() -> Denom {
        Denom::new_unchecked("uatom")
    }

    fn osmo() -> Denom {
        Denom::new_unchecked("uosmo")
    }

    #[test]
    fn minting_and_sending() {
        let mut bank = MockBank::new();
        let alice = Addr::mock(1);
        let bob = Addr::mock(2);

        bank.mint(alice, &coins! { atom() => 100, osmo() => 30 })
            .should_succeed();

        bank.send(alice, bob, &coins! { atom() => 40 }).should_succeed();

        assert_eq!(bank.balance(alice, &atom()), Uint128::new(60));
        assert_eq!(bank.balance(bob, &atom()), Uint128::new(40));

        bank.balances(alice)
            .should_succeed_and_equal(coins! { atom() => 60, osmo() => 30 });
    }

    #[test]
    fn sending_is_all_or_nothing() {
        let mut bank = MockBank::new();
        let alice = Addr::mock(1);
        let bob = Addr::mock(2);

        bank.mint(alice, &coins! { atom() => 100, osmo() => 5 })
            .should_succeed();

        // The second coin is short, so the first must not move either.
        bank.send(alice, bob, &coins! { atom() => 50, osmo() => 10 })
            .should_fail_with_error("insufficient balance");

        assert_eq!(bank.balance(alice, &atom()), Uint128::new(100));
        assert_eq!(bank.balance(bob, &atom()), Uint128::ZERO);
    }

    #[test]
    fn draining_deletes_the_record() {
        let mut bank = MockBank::new();
        let alice = Addr::mock(1);
        let bob = Addr::mock(2);

        bank.mint(alice, &coins! { atom() => 10 }).should_succeed();
        bank.send(alice, bob, &coins! { atom() => 10 }).should_succeed();

        bank.balances(alice).should_succeed_and_equal(Coins::new());
    }
}
