//! Application window lifecycle and inter-app composition core for a mobile
//! system shell. See [`shell`] for the component map.

pub mod shell;
