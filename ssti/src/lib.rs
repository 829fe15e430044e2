//!
//! # SSTI Black-Box Generator
//!
//! Generates the paired *driver* and *component* artifacts that bridge a hardware model,
//! running in its own process, into an SST simulation.
//!
//! The two exchange signals through a single byte buffer over a socket or ZeroMQ channel.
//! From a module's declared ports, SSTI:
//!
//! * Classifies the ports into clock, input, output and inout groups ([PortList])
//! * Packs them into non-overlapping buffer positions ([layout::allocate]),
//!   rendering one binding line per port in the formats of a [Binding] provider
//! * Declares the component's two simulation links ([links])
//! * Substitutes all of the above into two externally supplied templates ([template])
//! * Writes the results under a `blackboxes` directory ([emit])
//!
//! ## Usage
//!
//! ```skip
//! let manifest = BboxManifest::from_file("traffic_light.yaml")?;
//! let ports = manifest.port_list()?;
//! manifest.generator()?.generate(&ports, ".")?;
//! ```
//!

// Internal utilities crate
pub use sstiutils as utils;

pub mod error;
pub use error::*;

pub mod ports;
pub use ports::*;

pub mod width;
pub use width::*;

pub mod layout;
pub use layout::*;

pub mod links;
pub use links::*;

pub mod template;
pub use template::*;

pub mod ipc;
pub use ipc::*;

pub mod binding;
pub use binding::*;

pub mod emit;
pub use emit::*;

pub mod bbox;
pub use bbox::*;

pub mod manifest;
pub use manifest::*;

#[cfg(test)]
mod tests;
