use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] lh_config::ConfigError),

    #[error("Database error: {0}")]
    Db(#[from] lh_db::DbError),

    #[error("Geo resolver error: {0}")]
    Geo(#[from] lh_geo::GeoError),

    #[error("Failed to read JWT key file {path}: {source}")]
    JwtKeyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
