pub mod identity;
pub mod ledger;
pub mod retry;
pub mod tokens;
pub mod utils;
pub mod wallet;

pub use identity::ServerIdentity;
pub use ledger::{create_solana_client, RpcTokenLedger, TokenLedger};
pub use retry::RetryPolicy;
pub use wallet::{load_keypair, parse_pubkey};
