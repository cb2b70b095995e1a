#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum CreateError {
    #[error("conflict")]
    Conflict,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum UpdateError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum DeleteError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

/// Failure of a draft commit. Commits touch the store multiple times
/// (lookup followed by insert, replace or delete), so all store error
/// kinds funnel into this one.
#[derive(thiserror::Error, Debug)]
pub enum CommitError {
    #[error("conflict")]
    Conflict,
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<ReadError> for CommitError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::Storage(storage) => CommitError::Storage(storage),
            ReadError::Other(other) => CommitError::Other(other),
        }
    }
}

impl From<CreateError> for CommitError {
    fn from(value: CreateError) -> Self {
        match value {
            CreateError::Conflict => CommitError::Conflict,
            CreateError::Storage(storage) => CommitError::Storage(storage),
            CreateError::Other(other) => CommitError::Other(other),
        }
    }
}

impl From<UpdateError> for CommitError {
    fn from(value: UpdateError) -> Self {
        match value {
            UpdateError::NotFound => CommitError::NotFound,
            UpdateError::Storage(storage) => CommitError::Storage(storage),
            UpdateError::Other(other) => CommitError::Other(other),
        }
    }
}

impl From<DeleteError> for CommitError {
    fn from(value: DeleteError) -> Self {
        match value {
            DeleteError::NotFound => CommitError::NotFound,
            DeleteError::Storage(storage) => CommitError::Storage(storage),
            DeleteError::Other(other) => CommitError::Other(other),
        }
    }
}
