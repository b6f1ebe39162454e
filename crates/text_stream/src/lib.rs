#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod error;
mod options;
mod sink;
mod stream;

pub use crate::error::TextStreamError;
pub use crate::options::{DEFAULT_INDENTATION_SIZE, TextStreamOptions};
pub use crate::sink::TextSink;
pub use crate::stream::TextStream;
