use thiserror::Error;

#[derive(Error, Debug, Eq, PartialEq)]
pub enum PairErr {
    #[error("[Collect] Duplicate key `{key}`")]
    DuplicateKey { key: String },
}
