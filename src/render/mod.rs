pub(crate) mod clip;
pub(crate) mod composite;
pub(crate) mod line;
pub(crate) mod text;
pub(crate) mod wrap;
