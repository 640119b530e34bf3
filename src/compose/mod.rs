pub(crate) mod composer;
pub(crate) mod error_image;
pub(crate) mod fingerprint;
pub(crate) mod model;
mod svg;
