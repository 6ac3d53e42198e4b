pub mod config;
pub mod keychain;
pub mod restore;
