mod interface;
mod radix;

pub use interface::*;
pub use radix::Radix;
