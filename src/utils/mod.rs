// Shared helpers

pub mod format;
