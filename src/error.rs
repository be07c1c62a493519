use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LyricsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
