use std::string::ToString;
use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("unknown protocol: {0}")]
    UnknownProtocol(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("format error: {0}")]
    Format(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("rendered output is not utf-8: {0}")]
    Utf8(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e.to_string())
    }
}

impl From<handlebars::TemplateError> for Error {
    fn from(e: handlebars::TemplateError) -> Error {
        Error::Render(e.to_string())
    }
}

impl From<handlebars::RenderError> for Error {
    fn from(e: handlebars::RenderError) -> Error {
        Error::Render(e.to_string())
    }
}

impl From<syn::Error> for Error {
    fn from(e: syn::Error) -> Error {
        Error::Format(e.to_string())
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(e: std::string::FromUtf8Error) -> Error {
        Error::Utf8(e.to_string())
    }
}
