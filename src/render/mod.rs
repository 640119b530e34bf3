pub(crate) mod batch;
pub(crate) mod raster;
