//! Record model for the ticket API.
//! - Records travel as schemaless JSON objects (`record::Record`).
//! - `user` / `ticket` hold typed views used for seed data and by callers.
//! - `seed` defines the data every fresh process starts with.

pub mod errors;
pub mod collection;
pub mod record;
pub mod user;
pub mod ticket;
pub mod seed;

pub use collection::Collection;
pub use record::Record;

#[cfg(test)]
mod tests;
