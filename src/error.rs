use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("No Java home configured: set JAVA_HOME or java.java_home in the settings file")]
    MissingJavaHome,

    #[error(
        "No javac found for Java home {}: no JDK detected, re-run with a JDK installation",
        .java_home.display()
    )]
    JavacNotFound { java_home: PathBuf },

    #[error("Java error: {0}")]
    Java(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

