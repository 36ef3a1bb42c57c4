// Shared helpers for the project scanner

pub mod ignore;
pub mod paths;
