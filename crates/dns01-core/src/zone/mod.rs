// # Zone Finder Implementations
//
// - `SoaZoneFinder`: auto-discovery by walking SOA queries up the name
// - `FixedZoneFinder`: matching against an operator-supplied list of zones

pub mod fixed;
pub mod soa;

pub use crate::traits::zone_finder::{candidate_zones, un_fqdn};
pub use fixed::FixedZoneFinder;
pub use soa::SoaZoneFinder;
