use std::fmt::{Debug, Display};

/// Assertion methods on result types. Useful for testing, and for keeping
/// test code readable.
pub trait ResultExt: Sized {
    type Success;
    type Error;

    /// Ensure the result satisfies the given predicate.
    fn should<F>(self, predicate: F)
    where
        Self: Debug,
        F: FnOnce(&Self) -> bool,
    {
        assert!(
            predicate(&self),
            "result does not satisfy predicate! result: {self:?}"
        );
    }

    /// Ensure the result is ok; return the value.
    fn should_succeed(self) -> Self::Success;

    /// Ensure the result is ok, and the value matches the expected value.
    fn should_succeed_and_equal<U>(self, expect: U) -> Self::Success
    where
        Self::Success: Debug + PartialEq<U>,
        U: Debug,
    {
        let success = self.should_succeed();
        assert_eq!(
            success, expect,
            "success as expected, but with different value! expecting: {expect:?}, got: {success:?}"
        );
        success
    }

    /// Ensure the result is an error; return it.
    fn should_fail(self) -> Self::Error;

    /// Ensure the result is an error whose message contains the expected
    /// string as a substring.
    fn should_fail_with_error<U>(self, expect: U) -> Self::Error
    where
        Self::Error: Display,
        U: Display,
    {
        let error = self.should_fail();
        assert!(
            error.to_string().contains(&expect.to_string()),
            "fail as expected, but with wrong error! expecting: {expect}, got: {error}"
        );
        error
    }

    /// Ensure the result matches the given result.
    fn should_match<T, E>(self, expect: Result<T, E>)
    where
        Self::Success: Debug + PartialEq<T>,
        Self::Error: Display,
        T: Debug,
        E: Display,
    {
        match expect {
            Ok(expect) => {
                self.should_succeed_and_equal(expect);
            },
            Err(expect) => {
                self.should_fail_with_error(expect);
            },
        }
    }
}

impl<T, E> ResultExt for Result<T, E>
where
    T: Debug,
    E: Display,
{
    type Error = E;
    type Success = T;

    fn should_succeed(self) -> Self::Success {
        match self {
            Self::Ok(value) => value,
            Self::Err(err) => panic!("expecting ok, got error: {err}"),
        }
    }

    fn should_fail(self) -> Self::Error {
        match self {
            Self::Err(err) => err,
            Self::Ok(value) => panic!("expecting error, got ok: {value:?}"),
        }
    }
}
