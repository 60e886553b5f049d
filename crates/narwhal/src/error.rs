pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("input columns differ in length: {}", describe_lengths(.columns))]
    ShapeMismatch {
        columns: Vec<(&'static str, usize)>,
    },

    #[error("unknown dimension {dimension:?} (expected x, y or weight)")]
    UnknownDimension { dimension: String },

    #[error("invalid dimension {dimension:?} (expected x, y or size)")]
    InvalidDimension { dimension: String },

    #[error(transparent)]
    Layout(#[from] narwhal_layout::Error),

    #[error("parameter `{name}` was given as an empty list")]
    EmptyParameter { name: &'static str },

    #[error("invalid configuration: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_lengths(columns: &[(&'static str, usize)]) -> String {
    columns
        .iter()
        .map(|(name, len)| format!("{name}={len}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Fails with [`Error::ShapeMismatch`] unless every column has the same length.
pub(crate) fn ensure_same_length(columns: &[(&'static str, usize)]) -> Result<usize> {
    let Some(&(_, expected)) = columns.first() else {
        return Ok(0);
    };
    if columns.iter().any(|&(_, len)| len != expected) {
        return Err(Error::ShapeMismatch {
            columns: columns.to_vec(),
        });
    }
    Ok(expected)
}
