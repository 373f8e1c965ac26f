//! Host network facts: interface snapshots, the primary IPv4 address used for
//! the control socket, and the outbound connectivity probe.

pub mod errors;
pub mod host;
pub mod probe;
pub mod snapshot;

pub use errors::{NetworkError, ProbeError};
pub use host::primary_ipv4;
pub use probe::{ConnectivityProbe, HttpProbe};
pub use snapshot::{InterfaceSource, InterfaceState, NetworkSnapshot, SystemInterfaces};
