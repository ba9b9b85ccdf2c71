// serpshare-logit/src/lib.rs
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod visibility;
pub mod ranges;
pub mod tfidf;
pub mod softmax;

/// A probability mass assigned to one candidate of a batch.
pub type Share = f64;
