use thiserror::Error;

#[derive(Error, Debug)]
pub enum DemError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("unsupported sample layout {0}")]
    SampleLayout(String),

    #[error("raster has no cells")]
    EmptyRaster,

    #[error("expected {expected} samples, got {got}")]
    SampleCount { expected: usize, got: usize },
}
