pub(crate) mod farthestfirst;
pub(crate) mod kmeanplusplus;
pub(crate) mod precomputed;
pub(crate) mod randomsample;
