pub mod gossip;
pub mod peers;
#[cfg(test)]
pub mod testing;
pub mod transport;

pub use gossip::{Gossip, Notification, PeerTransport};
pub use peers::PeerRegistry;
pub use transport::HttpTransport;
