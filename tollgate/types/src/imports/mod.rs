mod bank;
mod storage;

pub use {bank::*, storage::*};
