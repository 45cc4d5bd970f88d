//! Error types.

use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// The error type returned by fallible constructors of physical properties and ordinal mappings.
#[derive(Debug)]
pub enum PropertyError {
    /// This error indicates that a function has been called with an invalid argument.
    Argument(ArgumentError),
    /// This error indicates that a textual representation of a property could not be parsed.
    Parse(ParseError),
}

impl PropertyError {
    /// Creates an [argument error](PropertyError::Argument).
    /// This method is a shorthand for `PropertyError::Argument(ArgumentError::new(message))`.
    pub fn argument<T>(message: T) -> PropertyError
    where
        T: Into<String>,
    {
        PropertyError::Argument(ArgumentError::new(message))
    }

    /// Creates a [parse error](PropertyError::Parse) for the given input.
    pub fn parse<I, T>(input: I, message: T) -> PropertyError
    where
        I: Into<String>,
        T: Into<String>,
    {
        PropertyError::Parse(ParseError::new(input, message))
    }
}

impl Display for PropertyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyError::Argument(err) => write!(f, "Argument error: {}", err),
            PropertyError::Parse(err) => write!(f, "Parse error: {}", err),
        }
    }
}

impl Error for PropertyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PropertyError::Argument(_) => None,
            PropertyError::Parse(_) => None,
        }
    }
}

impl From<ArgumentError> for PropertyError {
    fn from(err: ArgumentError) -> Self {
        PropertyError::Argument(err)
    }
}

impl From<ParseError> for PropertyError {
    fn from(err: ParseError) -> Self {
        PropertyError::Parse(err)
    }
}

/// Argument error. See [PropertyError::Argument].
#[derive(Debug)]
pub struct ArgumentError {
    message: String,
    backtrace: Backtrace,
}

impl ArgumentError {
    /// Creates a new instance of an [ArgumentError].
    /// This method captures a backtrace.
    pub fn new<T>(message: T) -> Self
    where
        T: Into<String>,
    {
        ArgumentError {
            message: message.into(),
            backtrace: Backtrace::new(),
        }
    }

    /// Returns the backtrace captured when this error was created.
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }
}

impl Display for ArgumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", &self.message)
    }
}

/// Parse error. See [PropertyError::Parse].
#[derive(Debug)]
pub struct ParseError {
    input: String,
    message: String,
    backtrace: Backtrace,
}

impl ParseError {
    /// Creates an instance of a [ParseError] for the given input.
    /// This method captures a backtrace.
    pub fn new<I, T>(input: I, message: T) -> Self
    where
        I: Into<String>,
        T: Into<String>,
    {
        ParseError {
            input: input.into(),
            message: message.into(),
            backtrace: Backtrace::new(),
        }
    }

    /// Returns the text that could not be parsed.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the backtrace captured when this error was created.
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} in '{}'", self.message, self.input)
    }
}
