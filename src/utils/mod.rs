// Start of file: /src/utils/mod.rs

/*
    * Shared HTTP plumbing: global error mapping and request timing middleware.
*/

pub mod error_handler;
pub mod request_timer;

// End of file: /src/utils/mod.rs
