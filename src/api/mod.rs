// Start of file: /src/api/mod.rs

pub mod hello;

// End of file: /src/api/mod.rs
