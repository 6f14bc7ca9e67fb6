use log::info;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use std::sync::{Arc, RwLock};

/// The single server-held keypair that pays for and authorizes every
/// server-initiated write: fee payer, mint authority, freeze authority and
/// metadata update authority.
///
/// Each issuance takes a snapshot with [`ServerIdentity::current`], so a
/// rotation never changes the signer in the middle of a sequence.
pub struct ServerIdentity {
    keypair: RwLock<Arc<Keypair>>,
}

impl ServerIdentity {
    pub fn new(keypair: Keypair) -> Self {
        info!("Server identity loaded: {}", keypair.pubkey());
        Self {
            keypair: RwLock::new(Arc::new(keypair)),
        }
    }

    pub fn current(&self) -> Arc<Keypair> {
        match self.keypair.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn pubkey(&self) -> Pubkey {
        self.current().pubkey()
    }

    /// Replace the keypair used by issuances started after this call.
    pub fn rotate(&self, keypair: Keypair) -> Pubkey {
        let pubkey = keypair.pubkey();
        let mut guard = match self.keypair.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        info!("Rotating server identity {} -> {}", guard.pubkey(), pubkey);
        *guard = Arc::new(keypair);
        pubkey
    }
}
