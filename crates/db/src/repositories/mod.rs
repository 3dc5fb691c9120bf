//! Repository layer: one zero-sized struct per table with async query
//! methods that run on a borrowed [`Session`](crate::Session).

pub mod todo_repo;

pub use todo_repo::TodoRepo;
