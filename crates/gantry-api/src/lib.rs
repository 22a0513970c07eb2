// gantry-api: Async Rust clients for the gantry downstream systems.
//
// Three independent services, one client each:
// - `exec`: out-of-band command-execution channel on the backing host
// - `balancer`: load-balancer admin API (target groups, listener rules)
// - `dns`: DNS record publisher (zone-scoped upserts)

pub mod balancer;
pub mod dns;
pub mod error;
pub mod exec;
mod http;
pub mod transport;

pub use balancer::BalancerClient;
pub use dns::DnsClient;
pub use error::Error;
pub use exec::ExecClient;
pub use transport::{TlsMode, TransportConfig};
