//!
//! # Inter-Process Communication Protocols
//!

// Crates.io Imports
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// Local Imports
use crate::error::{BboxError, BboxResult};
use crate::utils::{enumstr, EnumStr};

/// Channel name used by the generated component for both sending and receiving
pub const SIGNAL_IO: &str = "m_signal_io";

enumstr!(
    /// # IPC Protocol
    /// Byte-buffer transport between the component and its driver process.
    IpcProtocol {
        Sock: "sock",
        Zmq: "zmq",
    }
);
impl IpcProtocol {
    /// Parse a protocol selector, failing with [BboxError::Configuration] for anything unsupported.
    pub fn parse(txt: &str) -> BboxResult<Self> {
        Self::from_str(txt).ok_or_else(|| {
            BboxError::Configuration(format!(
                "Incorrect IPC protocol `{}` selected, expected one of {:?}",
                txt,
                Self::ALL.iter().map(|p| p.to_str()).collect::<Vec<_>>()
            ))
        })
    }
    /// Transport-signal type substituted into the component artifact
    pub fn sig_type(&self) -> &'static str {
        match self {
            Self::Sock => "SocketSignal",
            Self::Zmq => "ZMQSignal",
        }
    }
}
