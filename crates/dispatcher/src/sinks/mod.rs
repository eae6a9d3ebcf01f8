//! Sink implementations

mod file;

pub use self::file::FileSink;

#[cfg(test)]
pub(crate) mod testing;
