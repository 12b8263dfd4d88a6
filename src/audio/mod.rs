pub mod analysis;
pub mod decode;
pub mod features;

pub use features::{AudioFeed, Band};
