//! Application shell: context construction, orchestration, exit mapping.

pub(crate) mod context;
pub(crate) mod exit_handler;
pub(crate) mod runtime;
pub(crate) mod terminal;
