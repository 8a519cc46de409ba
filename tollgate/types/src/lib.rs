mod address;
mod coin;
mod coins;
mod denom;
mod encoding;
mod error;
mod fee;
mod imports;
mod macros;
mod packet;
mod result;
mod signer;
mod testing;
mod uint;

pub use {
    address::*, coin::*, coins::*, denom::*, encoding::*, error::*, fee::*, imports::*, packet::*,
    result::*, signer::*, testing::*, uint::*,
};
