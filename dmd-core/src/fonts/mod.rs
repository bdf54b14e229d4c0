//! Bundled font tables

mod system5x7;

pub use system5x7::SYSTEM_5X7;
