mod fetch;

pub use fetch::{bytes_to_blob, FetchTransport};
