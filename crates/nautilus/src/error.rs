#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("mind map does not contain the root entry: {id}")]
    MissingRoot { id: String },

    #[error("connection references a missing entry: {source_id} -- {target_id}")]
    MissingEndpoint {
        source_id: String,
        target_id: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
