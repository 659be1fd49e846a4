pub type SceneResult<T> = Result<T, SceneError>;

/// Errors raised by scene graph mutations.
///
/// Every operation that returns one of these leaves the graph exactly as it
/// was before the call.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// A required identifier was empty, or a value had the wrong kind.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The target already holds a child (or layer) with this name.
    #[error("name collision: \"{name}\" already exists on \"{parent}\"")]
    NameCollision { name: String, parent: String },

    /// A scene document could not be parsed.
    #[error("scene document error: {0}")]
    Document(String),
}

impl SceneError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn name_collision(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::NameCollision { name: name.into(), parent: parent.into() }
    }

    pub fn document(msg: impl Into<String>) -> Self {
        Self::Document(msg.into())
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(err: serde_json::Error) -> Self {
        Self::document(err.to_string())
    }
}
