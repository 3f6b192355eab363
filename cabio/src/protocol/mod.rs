// cabio/src/protocol/mod.rs

pub mod checksum;
pub mod codec;
pub mod commands;
pub mod frame;
pub mod iobuf;
pub mod responses;

pub use codec::Decoded;
pub use commands::{Command, Request};
pub use frame::Frame;
pub use iobuf::IoBuf;
pub use responses::{BoardInfo, Response};
