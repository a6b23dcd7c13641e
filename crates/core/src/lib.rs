pub mod config;
pub mod error;
pub mod record;
pub mod store;

pub use config::DumpConfig;
pub use error::DumpError;
pub use record::*;
pub use store::DumpStore;
