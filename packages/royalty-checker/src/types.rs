//! Wire models for the Helius indexer responses.
//!
//! Only the fields the royalty check reads are modelled; everything else in
//! the payload is ignored.

use serde::{Deserialize, Serialize};

// --- Parsed transactions (`/v0/transactions`) ---

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTransaction {
    #[serde(default)]
    pub signature: String,
    #[serde(default)]
    pub native_transfers: Vec<NativeTransfer>,
    #[serde(default)]
    pub events: TransactionEvents,
}

/// Transfer of the chain's base currency, amount in lamports.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeTransfer {
    #[serde(default)]
    pub from_user_account: String,
    #[serde(default)]
    pub to_user_account: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionEvents {
    pub nft: Option<NftEvent>,
}

/// NFT sale event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftEvent {
    pub amount: f64,
    #[serde(default)]
    pub buyer: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub nfts: Vec<NftToken>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NftToken {
    pub mint: String,
}

// --- Token metadata (`/v0/tokens/metadata`) ---

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadata {
    #[serde(default)]
    pub account: String,
    pub on_chain_data: OnChainData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OnChainData {
    pub data: OnChainMetadata,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnChainMetadata {
    #[serde(default)]
    pub name: String,
    pub seller_fee_basis_points: u16,
    #[serde(default)]
    pub creators: Vec<Creator>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Creator {
    pub address: String,
    /// Percentage (0-100) of the royalty owed to this creator.
    pub share: u8,
    #[serde(default)]
    pub verified: bool,
}

// --- Request bodies ---

#[derive(Debug, Serialize)]
pub struct TransactionsRequest<'a> {
    pub transactions: [&'a str; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRequest<'a> {
    pub mint_accounts: [&'a str; 1],
}
