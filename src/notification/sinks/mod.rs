//! 具体 sink 实现

pub mod stdout;
pub mod jsonl_file;

pub use stdout::StdoutSink;
pub use jsonl_file::JsonlFileSink;
