use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeariseError {
    #[error("year range {0}..{1} is not increasing")]
    InvalidRange(i32, i32),

    #[error("elevation grid has no cells")]
    EmptyGrid,
}
