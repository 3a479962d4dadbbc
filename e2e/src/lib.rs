//! End-to-end scenarios for the BPT Store SDK against a local mock of the API.

#[cfg(test)]
mod tests;
