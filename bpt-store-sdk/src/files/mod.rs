pub(crate) mod core;
pub(crate) mod metadata;
mod upload;
