// Adapters layer: concrete index sources behind the `IndexSource` port.

pub mod file;
pub mod http;

pub use self::file::FileSource;
pub use self::http::HttpSource;
