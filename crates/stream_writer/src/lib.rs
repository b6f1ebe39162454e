#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod config;
mod encoder;
mod error;
mod input;
mod sink;
mod stats;
mod text;
mod trace;
mod writer;

pub use config::{DEFAULT_BUFFER_CAPACITY, DEFAULT_ERROR_CHANNEL_CAPACITY, WriterConfig};
pub use encoder::{EncodeError, Encoder, Latin1Encoder, Utf8Encoder};
pub use error::WriteError;
pub use input::Input;
pub use ring_buffer::OverflowPolicy;
pub use sink::{
    AsyncWriteSink, Completion, DEFAULT_HIGH_WATER_MARK, ReadySignal, Saturation, Sink,
};
pub use stats::WriterStats;
pub use writer::BufferedWriter;
