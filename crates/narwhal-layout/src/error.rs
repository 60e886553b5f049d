#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown layout algorithm: {name:?} (expected one of {expected})")]
    UnknownAlgorithm { name: String, expected: String },

    #[error("{algorithm} layout did not converge")]
    NoConvergence { algorithm: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
