//! Full-body fetch of a program download.

mod single;

pub use single::fetch_to_path;
