mod lock;
mod mutex;

pub use lock::*;
