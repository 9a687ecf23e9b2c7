pub mod billing;
pub mod claims;
pub mod config;
pub mod inventory;
pub mod logging;
pub mod profile;
pub mod reader;
pub mod report;
pub mod schema;
pub mod seed;
pub mod store;
pub mod templates;
pub mod validation;
