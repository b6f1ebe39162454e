#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub use ring_buffer;
pub use stream_writer::{
    AsyncWriteSink, BufferedWriter, Completion, DEFAULT_BUFFER_CAPACITY,
    DEFAULT_ERROR_CHANNEL_CAPACITY, DEFAULT_HIGH_WATER_MARK, EncodeError, Encoder, Input,
    Latin1Encoder, OverflowPolicy, ReadySignal, Saturation, Sink, Utf8Encoder, WriteError,
    WriterConfig, WriterStats,
};
pub use text_stream::{
    DEFAULT_INDENTATION_SIZE, TextSink, TextStream, TextStreamError, TextStreamOptions,
};
