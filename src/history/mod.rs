pub mod audit;
pub mod config;
pub mod dates;
pub mod decode;
pub mod export;
pub mod merge;
pub mod ops;
pub mod paths;
pub mod prompt;
pub mod record;
pub mod state;
pub mod store;
