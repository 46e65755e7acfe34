mod decoder;
mod url;

pub use decoder::*;
pub use url::*;
