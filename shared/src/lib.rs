mod api;
pub mod util;

pub use api::*;
pub use util::{heading_offset, heading_vector};
