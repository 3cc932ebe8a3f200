pub(crate) mod apportion;
pub(crate) mod grouper;
