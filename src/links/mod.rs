//! Link extraction and reachability sampling.
//!
//! Every anchor is counted, but only the first 15 internal and 15 external
//! links (deduplicated by resolved href) are checked over the network.

mod checker;
mod extract;
mod types;

pub use checker::{LinkChecker, LinkStatus};
pub use extract::{extract_links, is_click_here, normalize_href};
pub use types::{LinkCheckResult, LinkClass, LinkRecord, LinkSignals};
