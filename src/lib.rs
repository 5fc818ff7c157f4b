//! 惰性、可组合的键值对流水线。
//!
//! ```
//! use pairpipe::collect::to_map;
//! use pairpipe::PairPipe;
//!
//! let map = PairPipe::of2(1, "x", 2, "y").map_value(str::to_uppercase).collect(to_map()).unwrap();
//! assert_eq!("X", map[&1]);
//! ```

pub mod collect;
mod err;
mod num;
mod pair;
mod pair_pipe;
mod pipe;
mod step;

pub use err::PairErr;
pub use num::{NumStats, Numeric};
pub use pair::Pair;
pub use pair_pipe::PairPipe;
pub use pipe::Pipe;
pub use step::Step;

pub type PairRes<T> = Result<T, PairErr>;
