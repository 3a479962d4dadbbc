pub(crate) mod core;
pub(crate) mod options;
mod request;
