use anyhow::{anyhow, Result};
use log::info;
use solana_sdk::{
    program_pack::Pack,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    system_instruction,
};
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account_idempotent,
};
use spl_token::{
    instruction::{self as token_instruction, AuthorityType},
    state::Mint,
    ID as TOKEN_PROGRAM_ID,
};

use crate::solana::ledger::TokenLedger;
use crate::solana::retry::RetryPolicy;

/// Create a new mint with `authority` as both mint and freeze authority.
pub async fn create_mint(
    ledger: &dyn TokenLedger,
    authority: &Keypair,
    decimals: u8,
) -> Result<Pubkey> {
    let mint = Keypair::new();
    let authority_pubkey = authority.pubkey();

    let lamports = ledger.minimum_balance_for_rent_exemption(Mint::LEN).await?;

    let instructions = vec![
        system_instruction::create_account(
            &authority_pubkey,
            &mint.pubkey(),
            lamports,
            Mint::LEN as u64,
            &TOKEN_PROGRAM_ID,
        ),
        token_instruction::initialize_mint2(
            &TOKEN_PROGRAM_ID,
            &mint.pubkey(),
            &authority_pubkey,
            Some(&authority_pubkey),
            decimals,
        )
        .map_err(|e| anyhow!("Failed to create initialize mint instruction: {}", e))?,
    ];

    ledger
        .send_instructions(authority, &[&mint], &instructions)
        .await?;

    Ok(mint.pubkey())
}

/// One attempt at resolving `owner`'s associated token account for `mint`,
/// creating it with `payer` funds when it is missing.
async fn resolve_associated_account(
    ledger: &dyn TokenLedger,
    payer: &Keypair,
    mint: &Pubkey,
    owner: &Pubkey,
) -> Result<Pubkey> {
    let address = get_associated_token_address(owner, mint);

    if ledger.account_exists(&address).await? {
        return Ok(address);
    }

    let instruction =
        create_associated_token_account_idempotent(&payer.pubkey(), owner, mint, &TOKEN_PROGRAM_ID);
    ledger.send_instructions(payer, &[], &[instruction]).await?;

    if !ledger.account_exists(&address).await? {
        return Err(anyhow!(
            "Associated token account {} is not visible yet",
            address
        ));
    }

    Ok(address)
}

/// Get or create the associated token account, retrying under `policy`.
/// Accounts created right after their mint are often not readable at once.
pub async fn get_or_create_associated_account(
    ledger: &dyn TokenLedger,
    payer: &Keypair,
    mint: &Pubkey,
    owner: &Pubkey,
    policy: &RetryPolicy,
) -> Result<Pubkey> {
    policy
        .run("get associated token account", |_| {
            resolve_associated_account(ledger, payer, mint, owner)
        })
        .await
}

/// Mint `amount` base units of `mint` into `destination`.
pub async fn mint_to(
    ledger: &dyn TokenLedger,
    authority: &Keypair,
    mint: &Pubkey,
    destination: &Pubkey,
    amount: u64,
) -> Result<Signature> {
    let instruction = token_instruction::mint_to(
        &TOKEN_PROGRAM_ID,
        mint,
        destination,
        &authority.pubkey(),
        &[],
        amount,
    )
    .map_err(|e| anyhow!("Failed to create mint instruction: {}", e))?;

    let signature = ledger
        .send_instructions(authority, &[], &[instruction])
        .await?;
    info!("Minted {} base units of {} to {}", amount, mint, destination);

    Ok(signature)
}

/// Clear an authority on `mint` for good.
pub async fn revoke_authority(
    ledger: &dyn TokenLedger,
    authority: &Keypair,
    mint: &Pubkey,
    authority_type: AuthorityType,
) -> Result<Signature> {
    let instruction = token_instruction::set_authority(
        &TOKEN_PROGRAM_ID,
        mint,
        None,
        authority_type,
        &authority.pubkey(),
        &[],
    )
    .map_err(|e| anyhow!("Failed to create set authority instruction: {}", e))?;

    ledger
        .send_instructions(authority, &[], &[instruction])
        .await
}
