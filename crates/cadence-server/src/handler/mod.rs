//! Route handlers, one module per resource.

pub mod health;
pub mod media;
pub mod post;
pub mod publication;
