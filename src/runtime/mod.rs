pub mod archive;
pub mod fetcher;
pub mod logging;
pub mod types;
