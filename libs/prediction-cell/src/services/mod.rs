pub mod hour_search;
pub mod model;
pub mod recommendation;

pub use hour_search::*;
pub use model::*;
pub use recommendation::*;
