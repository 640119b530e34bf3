pub(crate) mod asset;
pub(crate) mod decode;
