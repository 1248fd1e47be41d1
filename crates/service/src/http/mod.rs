//! HTTP-backed implementations of every port.

mod upstream;

pub use upstream::HttpUpstream;
