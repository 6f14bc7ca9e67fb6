//! In-memory ledger that interprets the instructions the service builds.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    system_program,
    transaction::Transaction,
};
use spl_token::instruction::{AuthorityType, TokenInstruction};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use super::TokenLedger;
use crate::entity::TokenCreatorError;
use crate::solana::tokens::constants::TOKEN_METADATA_PROGRAM_ID;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockMint {
    pub decimals: u8,
    pub supply: u64,
    pub mint_authority: Option<Pubkey>,
    pub freeze_authority: Option<Pubkey>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenOp {
    InitializeMint { decimals: u8 },
    MintTo { amount: u64 },
    SetAuthority {
        authority_type: AuthorityType,
        new_authority: Option<Pubkey>,
    },
    Other,
}

#[derive(Default)]
pub struct MockState {
    pub submitted: Vec<Transaction>,
    pub sent: Vec<Vec<Instruction>>,
    pub accounts: HashSet<Pubkey>,
    pub mints: HashMap<Pubkey, MockMint>,
    pub balances: HashMap<Pubkey, u64>,
    pub blockhash_requests: usize,
    pub account_lookups: usize,
    /// Reads of freshly created associated accounts that still report "missing".
    pub visibility_lag: u32,
    lagging: HashSet<Pubkey>,
    /// Sends touching this program fail.
    pub fail_program: Option<Pubkey>,
    pub fail_submit: bool,
    /// Simulated confirmation time of every send.
    pub send_delay: Duration,
}

#[derive(Default)]
pub struct MockLedger {
    pub state: Mutex<MockState>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_visibility_lag(lag: u32) -> Self {
        let ledger = Self::default();
        ledger.state.lock().unwrap().visibility_lag = lag;
        ledger
    }

    pub fn failing_program(program_id: Pubkey) -> Self {
        let ledger = Self::default();
        ledger.state.lock().unwrap().fail_program = Some(program_id);
        ledger
    }

    /// Every instruction sent so far, in order.
    pub fn instructions(&self) -> Vec<Instruction> {
        self.state.lock().unwrap().sent.iter().flatten().cloned().collect()
    }

    /// SPL Token instructions sent so far, decoded.
    pub fn token_ops(&self) -> Vec<TokenOp> {
        self.instructions()
            .iter()
            .filter(|ix| ix.program_id == spl_token::id())
            .map(|ix| match TokenInstruction::unpack(&ix.data) {
                Ok(TokenInstruction::InitializeMint2 { decimals, .. }) => {
                    TokenOp::InitializeMint { decimals }
                }
                Ok(TokenInstruction::MintTo { amount }) => TokenOp::MintTo { amount },
                Ok(TokenInstruction::SetAuthority {
                    authority_type,
                    new_authority,
                }) => TokenOp::SetAuthority {
                    authority_type,
                    new_authority: new_authority.into(),
                },
                _ => TokenOp::Other,
            })
            .collect()
    }

    pub fn mint(&self, mint: &Pubkey) -> Option<MockMint> {
        self.state.lock().unwrap().mints.get(mint).cloned()
    }

    pub fn balance(&self, account: &Pubkey) -> u64 {
        self.state
            .lock()
            .unwrap()
            .balances
            .get(account)
            .copied()
            .unwrap_or_default()
    }

    fn apply(state: &mut MockState, ix: &Instruction) -> Result<()> {
        if ix.program_id == system_program::id() {
            state.accounts.insert(ix.accounts[1].pubkey);
        } else if ix.program_id == spl_associated_token_account::id() {
            let address = ix.accounts[1].pubkey;
            state.accounts.insert(address);
            state.lagging.insert(address);
        } else if ix.program_id == TOKEN_METADATA_PROGRAM_ID {
            state.accounts.insert(ix.accounts[0].pubkey);
        } else if ix.program_id == spl_token::id() {
            let mint_address = ix.accounts[0].pubkey;
            match TokenInstruction::unpack(&ix.data)? {
                TokenInstruction::InitializeMint2 {
                    decimals,
                    mint_authority,
                    freeze_authority,
                } => {
                    state.mints.insert(
                        mint_address,
                        MockMint {
                            decimals,
                            supply: 0,
                            mint_authority: Some(mint_authority),
                            freeze_authority: freeze_authority.into(),
                        },
                    );
                }
                TokenInstruction::MintTo { amount } => {
                    let destination = ix.accounts[1].pubkey;
                    let authority = ix.accounts[2].pubkey;
                    if !state.accounts.contains(&destination) {
                        return Err(anyhow!("destination account {} does not exist", destination));
                    }
                    let mint = state
                        .mints
                        .get_mut(&mint_address)
                        .ok_or_else(|| anyhow!("unknown mint {}", mint_address))?;
                    if mint.mint_authority != Some(authority) {
                        return Err(anyhow!("owner does not match mint authority"));
                    }
                    mint.supply += amount;
                    *state.balances.entry(destination).or_default() += amount;
                }
                TokenInstruction::SetAuthority {
                    authority_type,
                    new_authority,
                } => {
                    let mint = state
                        .mints
                        .get_mut(&mint_address)
                        .ok_or_else(|| anyhow!("unknown mint {}", mint_address))?;
                    match authority_type {
                        AuthorityType::MintTokens => mint.mint_authority = new_authority.into(),
                        AuthorityType::FreezeAccount => mint.freeze_authority = new_authority.into(),
                        _ => return Err(anyhow!("unsupported authority type")),
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}

#[async_trait]
impl TokenLedger for MockLedger {
    async fn latest_blockhash(&self) -> Result<Hash> {
        self.state.lock().unwrap().blockhash_requests += 1;
        Ok(Hash::new_from_array([7u8; 32]))
    }

    async fn submit_signed_transaction(&self, transaction: &Transaction) -> Result<Signature> {
        let mut state = self.state.lock().unwrap();
        if state.fail_submit {
            return Err(TokenCreatorError::SolanaClient("blockhash not found".to_string()).into());
        }
        state.submitted.push(transaction.clone());
        Ok(transaction.signatures.first().copied().unwrap_or_default())
    }

    async fn send_instructions(
        &self,
        _payer: &Keypair,
        _signers: &[&Keypair],
        instructions: &[Instruction],
    ) -> Result<Signature> {
        let delay = self.state.lock().unwrap().send_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock().unwrap();
        if let Some(program_id) = state.fail_program {
            if instructions.iter().any(|ix| ix.program_id == program_id) {
                return Err(TokenCreatorError::SolanaClient(format!(
                    "simulated failure in program {}",
                    program_id
                ))
                .into());
            }
        }
        for ix in instructions {
            Self::apply(&mut state, ix)?;
        }
        state.sent.push(instructions.to_vec());
        Ok(Signature::new_unique())
    }

    async fn account_exists(&self, address: &Pubkey) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        state.account_lookups += 1;
        if state.lagging.contains(address) && state.visibility_lag > 0 {
            state.visibility_lag -= 1;
            return Ok(false);
        }
        Ok(state.accounts.contains(address))
    }

    async fn minimum_balance_for_rent_exemption(&self, _data_len: usize) -> Result<u64> {
        Ok(1_461_600)
    }
}
