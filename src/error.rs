use camino::FromPathBufError;
use csv::Error as CsvError;
use derive_builder::UninitializedFieldError;
use notify_rust::error::Error as NotifyError;
use pastey::paste;
use rand::seq::WeightError;
use serde_json::Error as JsonError;
use serde_norway::Error as YamlError;
use snafu::{Backtrace, GenerateImplicitData, Snafu};
use std::io::Error as IoError;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum Error {
    Io {
        source: IoError,
        backtrace: Backtrace,
    },
    Yaml {
        source: YamlError,
        backtrace: Backtrace,
    },
    Json {
        source: JsonError,
        backtrace: Backtrace,
    },
    /// A snapshot document was missing a field or carried the wrong type.
    #[snafu(display("malformed snapshot document: {source}"))]
    MalformedData {
        source: serde_path_to_error::Error<JsonError>,
        backtrace: Backtrace,
    },
    Csv {
        source: CsvError,
        backtrace: Backtrace,
    },
    NonUtf8Path {
        source: FromPathBufError,
        backtrace: Backtrace,
    },
    Weights {
        source: WeightError,
        backtrace: Backtrace,
    },
    Builder {
        source: UninitializedFieldError,
        backtrace: Backtrace,
    },
    Notify {
        source: NotifyError,
        backtrace: Backtrace,
    },
    #[snafu(display("no habit with slug {slug}"))]
    HabitNotFound { slug: String },
    #[snafu(display("a habit with slug {slug} already exists"))]
    HabitAlreadyExists { slug: String },
    #[snafu(display("no habit is currently featured"))]
    NoFeaturedHabit,
    #[snafu(display("unsupported file type: {extension}"))]
    UnsupportedFileType { extension: String },
    #[snafu(display("{message}"))]
    Other { message: String },
}

impl Error {
    pub fn simple<S: AsRef<str>>(message: S) -> Self {
        Self::Other {
            message: String::from(message.as_ref()),
        }
    }

    pub fn habit_not_found<S: AsRef<str>>(slug: S) -> Self {
        Self::HabitNotFound {
            slug: String::from(slug.as_ref()),
        }
    }

    pub fn habit_already_exists<S: AsRef<str>>(slug: S) -> Self {
        Self::HabitAlreadyExists {
            slug: String::from(slug.as_ref()),
        }
    }

    pub fn unsupported_file_type<S: AsRef<str>>(extension: S) -> Self {
        Self::UnsupportedFileType {
            extension: String::from(extension.as_ref()),
        }
    }
}

macro_rules! impl_from {
    ($type:path, $error:ident, $base_error:ident) => {
        impl From<$type> for $base_error {
            fn from(error: $type) -> Self {
                Self::$error {
                    source: error,
                    backtrace: Backtrace::generate(),
                }
            }
        }
    };
    ($type:path, $error:ident) => {
        impl_from! { $type, $error, Error }
    };
    ($name:ident) => {
        paste! {
            impl_from! { [<$name Error>], $name }
        }
    };
}

impl_from! {FromPathBufError, NonUtf8Path}
impl_from! {UninitializedFieldError, Builder}
impl_from! {WeightError, Weights}
impl_from! {Io}
impl_from! {Yaml}
impl_from! {Json}
impl_from! {Csv}
impl_from! {Notify}

pub type Result<V> = core::result::Result<V, Error>;
