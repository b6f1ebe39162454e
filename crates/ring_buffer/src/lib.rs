#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod drain;
mod error;
mod policy;
mod ring;

pub use crate::drain::Drained;
pub use crate::error::BufferError;
pub use crate::policy::OverflowPolicy;
pub use crate::ring::{DEFAULT_CAPACITY, RingBuffer};
