//! # snowmint
//!
//! Snowflake-style identifiers for a single node in a distributed deployment.
//!
//! Every identifier packs three fields, from most to least significant bit:
//!
//! ```text
//!  +----------------------+-------------+-------------+
//!  | timestamp (ms-epoch) |   node ID   |  sequence   |
//!  +----------------------+-------------+-------------+
//! ```
//!
//! Two layouts ship with the crate:
//!
//! - [`CompactId`]: 64 bits (41 timestamp, 10 node ID, 13 sequence)
//! - [`ExtendedId`]: 128 bits (64 timestamp, 48 node ID, 16 sequence)
//!
//! A single [`SnowflakeGenerator`] produces both widths from one shared
//! state. Identifiers returned by one generator are strictly increasing for
//! every width, regardless of how many threads call it.
//!
//! ```
//! use snowmint::{Radix, RadixExt, SnowflakeGenerator};
//!
//! let generator = SnowflakeGenerator::new(1981);
//!
//! let a = generator.next_compact();
//! let b = generator.next_compact();
//! assert!(a < b);
//! assert_eq!(a.node_id(), 1981 & 0x3FF);
//!
//! let text = b.encode(Radix::Base36);
//! let when = generator.extract_time_str::<snowmint::CompactId>(&text, Radix::Base36)?;
//! assert_eq!(when, generator.extract_time(&b));
//! # Ok::<(), snowmint::Error>(())
//! ```
//!
//! ## Caveats
//!
//! - The node ID is masked into its field and never validated. Two node IDs
//!   that agree on the low bits collide.
//! - An epoch later than the current wall clock produces wrapped timestamp
//!   fields. Identifiers are only meaningful when `epoch <= now`.
//! - A clock that moves backwards stalls every caller until it catches up.

mod encoding;
mod error;
mod generator;
mod id;
#[cfg(feature = "serde")]
mod serde;
mod time;

pub use crate::encoding::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
#[cfg(feature = "serde")]
pub use crate::serde::*;
pub use crate::time::*;
