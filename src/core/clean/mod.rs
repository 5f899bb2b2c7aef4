pub mod batch;
pub mod runtime;
pub mod text;

pub use batch::*;
pub use runtime::*;
pub use text::*;
