use std::fmt;
use std::io;

#[derive(Debug)]
pub enum LoaderError {
    /// `next` was called on an exhausted iterator
    OutOfData,
    NotSupported(&'static str),
    InvalidFormat(String),
    /// Word reported present by the vocabulary but without a usable vector
    MissingVector(String),
    Io(io::Error),
}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoaderError::OutOfData => {
                write!(f, "No more examples, iterator is exhausted")
            }
            LoaderError::NotSupported(op) => {
                write!(f, "Operation not supported : {}", op)
            }
            LoaderError::InvalidFormat(msg) => {
                write!(f, "Invalid format : {}", msg)
            }
            LoaderError::MissingVector(word) => {
                write!(f, "No word vector for known word '{}'", word)
            }
            LoaderError::Io(err) => {
                write!(f, "I/O error : {}", err)
            }
        }
    }
}

impl std::error::Error for LoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoaderError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for LoaderError {
    fn from(err: io::Error) -> Self {
        LoaderError::Io(err)
    }
}
