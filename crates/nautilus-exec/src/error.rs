#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A rearrangement is already in flight on this handle. The request is
    /// rejected outright, not queued.
    #[error("a rearrangement is already in flight")]
    Busy,

    /// The worker thread could not be created. Callers should fall back to
    /// [`rearrange_blocking`](crate::rearrange_blocking).
    #[error("failed to start the layout worker: {0}")]
    Spawn(#[from] std::io::Error),

    /// The worker thread went away without sending a terminal message.
    #[error("layout worker disconnected without a terminal message")]
    Disconnected,
}

pub type Result<T> = std::result::Result<T, Error>;
