mod errors;

pub use errors::Error;
