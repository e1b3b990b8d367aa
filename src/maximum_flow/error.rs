use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("edge capacity must be non-negative")]
    NegativeCapacity,
    #[error("node index {index} is out of range for a network with {num_nodes} nodes")]
    NodeIndexOutOfRange { index: usize, num_nodes: usize },
    #[error("source and sink must be distinct")]
    SourceEqualsSink,
}
