use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed request: {0}")]
    MalformedRequest(&'static str),

    #[error("request head is larger than {0} bytes")]
    HeadTooLarge(usize),

    #[error("request body is larger than {0} bytes")]
    BodyTooLarge(usize),
}

impl Error {
    /// Status to answer with when the request couldn't be read, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::MalformedRequest(_) => Some(400),
            Error::BodyTooLarge(_) => Some(413),
            Error::HeadTooLarge(_) => Some(431),
            Error::Io(_) => None,
        }
    }
}
