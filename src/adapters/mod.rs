pub(crate) mod keyboard;
pub(crate) mod share;
pub(crate) mod source;
