#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! Re-exports the optimizer and the homography crates under one name.

#[doc(inline)]
pub use planar_optim as optim;

#[doc(inline)]
pub use planar_homography as homography;
