use gchat_core::relay::RelayError;
use gchat_core::reveal::RevealError;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .0)]
    Custom(String),

    #[error("IO::{:?}: {}", .0, .0)]
    Io(#[from] std::io::Error),

    #[error("FlexiLogger::{:?}: {}", .0, .0)]
    FlexiLogger(#[from] flexi_logger::FlexiLoggerError),

    #[error("Relay::{}", .0)]
    Relay(#[from] RelayError),

    #[error("Reveal::{}", .0)]
    Reveal(#[from] RevealError),
}
