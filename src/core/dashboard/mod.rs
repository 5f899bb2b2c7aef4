pub mod aggregate;
pub mod filters;
pub mod server;
pub mod types;
pub mod views;

pub use aggregate::combine_by_title;
pub use filters::Filters;
pub use server::serve;
pub use types::*;
