use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    system_instruction::{self, SystemInstruction},
    system_program,
    transaction::Transaction,
};

/// Build the unsigned fee transaction the client signs before issuance:
/// a single transfer of `lamports` from `payer` to `destination`, paid by
/// `payer`.
pub fn build_fee_transaction(
    payer: &Pubkey,
    destination: &Pubkey,
    lamports: u64,
    recent_blockhash: Hash,
) -> Transaction {
    let instruction = system_instruction::transfer(payer, destination, lamports);
    let mut transaction = Transaction::new_with_payer(&[instruction], Some(payer));
    transaction.message.recent_blockhash = recent_blockhash;
    transaction
}

/// Total lamports transferred to `destination` by system transfers in `transaction`.
pub fn lamports_paid_to(transaction: &Transaction, destination: &Pubkey) -> u64 {
    let keys = &transaction.message.account_keys;

    transaction
        .message
        .instructions
        .iter()
        .filter(|ix| keys.get(ix.program_id_index as usize) == Some(&system_program::id()))
        .filter(|ix| {
            ix.accounts
                .get(1)
                .and_then(|index| keys.get(*index as usize))
                == Some(destination)
        })
        .filter_map(|ix| match bincode::deserialize::<SystemInstruction>(&ix.data) {
            Ok(SystemInstruction::Transfer { lamports }) => Some(lamports),
            _ => None,
        })
        .fold(0u64, |total, lamports| total.saturating_add(lamports))
}
