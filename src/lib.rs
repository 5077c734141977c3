//! Static shipping dashboard: CSV in, four PNG charts and an `index.html` out.

pub mod color;
pub mod config;
pub mod data;
pub mod page;
pub mod pipeline;
pub mod render;
