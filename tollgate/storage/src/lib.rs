mod codec;
mod item;
mod key;
mod map;
mod path;
mod prefix;
mod utils;

pub use {codec::*, item::*, key::*, map::*, path::*, prefix::*, utils::*};
