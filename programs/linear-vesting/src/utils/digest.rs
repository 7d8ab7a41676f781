//! Batch fingerprint carried by `GrantsAdded`, so indexers can match an event
//! to the exact `(recipient, amount)` list that was submitted.

use anchor_lang::prelude::Pubkey;
use bytemuck::{Pod, Zeroable};

#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
struct BatchLeaf {
    recipient: [u8; 32],
    amount: u64,
}

/// blake3 over the ordered leaves. Callers guarantee equal lengths.
pub fn batch_digest(recipients: &[Pubkey], amounts: &[u64]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&(recipients.len() as u64).to_le_bytes());
    for (recipient, amount) in recipients.iter().zip(amounts) {
        let leaf = BatchLeaf {
            recipient: recipient.to_bytes(),
            amount: amount.to_le(),
        };
        hasher.update(bytemuck::bytes_of(&leaf));
    }
    *hasher.finalize().as_bytes()
}
