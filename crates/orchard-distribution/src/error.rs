use orchard_core::ChecksumAddress;

/// Errors raised by the distribution pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DistributionError {
    #[error("cumulative amount of {token} for {recipient} overflows uint256")]
    AmountOverflow {
        recipient: ChecksumAddress,
        token: ChecksumAddress,
    },

    #[error("no proof for {token} of {recipient}: {reason}")]
    MissingProof {
        recipient: ChecksumAddress,
        token: ChecksumAddress,
        reason: String,
    },

    #[error("proof of {token} for {recipient} does not match the root")]
    InvalidProof {
        recipient: ChecksumAddress,
        token: ChecksumAddress,
    },
}
