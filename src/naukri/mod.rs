pub mod client;
pub mod parser;
pub mod source;
pub mod throttle;

pub use client::NaukriClient;
pub use parser::{parse_listing_page, ListingSelectors};
pub use source::{PageSource, SnapshotSource};
pub use throttle::PageThrottle;
