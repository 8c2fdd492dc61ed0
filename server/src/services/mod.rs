//! Request-independent services: font loading, image fetching, composition.

pub mod compose;
pub mod fetch;
pub mod font;
