mod audio;
mod optimization;
mod params;

pub use audio::{
    normalize_f32, normalize_i16, normalize_i24, normalize_i32, validate_stereo, SampleRate,
    StereoBuffer,
};
pub use optimization::OptimizationResult;
pub use params::{
    MasteringParams, GAIN_ADJUSTMENT_RANGE_DB, LOW_CONTOUR_RANGE_DB, TUBE_DRIVE_RANGE,
};
