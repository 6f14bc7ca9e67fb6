use std::fmt;

/// Ordered steps of a token issuance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssuanceStep {
    ConfirmFee,
    CreateMint,
    CreateTokenAccount,
    MintSupply,
    UploadMetadata,
    CreateMetadataAccount,
    RevokeFreezeAuthority,
    RevokeMintAuthority,
}

impl fmt::Display for IssuanceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IssuanceStep::ConfirmFee => "confirm fee transaction",
            IssuanceStep::CreateMint => "create mint",
            IssuanceStep::CreateTokenAccount => "create token account",
            IssuanceStep::MintSupply => "mint supply",
            IssuanceStep::UploadMetadata => "upload metadata",
            IssuanceStep::CreateMetadataAccount => "create metadata account",
            IssuanceStep::RevokeFreezeAuthority => "revoke freeze authority",
            IssuanceStep::RevokeMintAuthority => "revoke mint authority",
        };
        write!(f, "{}", name)
    }
}
