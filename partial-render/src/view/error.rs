use thiserror::Error;

/// Boxed error coming out of a view engine.
pub type EngineError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("view \"{name}\" was not found, searched: {}", .searched.join(", "))]
    ViewNotFound { name: String, searched: Vec<String> },

    #[error("render error: {0}")]
    Render(#[source] EngineError),

    #[error("model serialization error: {0}")]
    Model(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("view output is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    /// Wrap any engine error.
    pub fn render(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Render(Box::new(err))
    }

    /// Message of the innermost error in the `source()` chain.
    pub fn root_cause(&self) -> String {
        let mut current: &(dyn std::error::Error + 'static) = self;

        while let Some(source) = current.source() {
            current = source;
        }

        let message = current.to_string();
        if message.is_empty() {
            self.to_string()
        } else {
            message
        }
    }

    /// Is this a missing view?
    pub fn not_found(&self) -> bool {
        matches!(self, Error::ViewNotFound { .. })
    }
}

impl From<minijinja::Error> for Error {
    fn from(err: minijinja::Error) -> Self {
        Error::render(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = Error::ViewNotFound {
            name: "Missing".into(),
            searched: vec!["Missing.html".into(), "shared/Missing.html".into()],
        };

        assert!(err.not_found());
        assert_eq!(
            err.to_string(),
            "view \"Missing\" was not found, searched: Missing.html, shared/Missing.html"
        );
        // Nothing underneath, so the root cause is the error itself.
        assert_eq!(err.root_cause(), err.to_string());
    }

    #[test]
    fn test_root_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err = Error::render(io);

        assert!(err.to_string().starts_with("render error"));
        assert_eq!(err.root_cause(), "disk on fire");
    }
}
