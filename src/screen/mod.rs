pub(crate) mod config;
pub(crate) mod record;
pub(crate) mod state;
