//! Application services for the Scene History context.

pub mod store;
