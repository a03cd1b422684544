//! Royalty evaluation.
//!
//! Pure functions over the fetched records: no I/O happens here, the checker
//! decides when each line is written.

use crate::types::{Creator, NativeTransfer, ParsedTransaction, TokenMetadata};
use crate::Error;

/// Royalty bips are divided by 1000, not the conventional 10_000. Observed
/// payout tooling reports against this figure, so it is kept as-is.
pub const ROYALTY_BIPS_DIVISOR: f64 = 1000.0;

/// Token and price pulled out of a sale event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sale<'a> {
    pub mint: &'a str,
    pub amount: f64,
}

/// First token of the transaction's NFT sale event.
pub fn sale_of(tx: &ParsedTransaction) -> Result<Sale<'_>, Error> {
    let event = tx.events.nft.as_ref().ok_or_else(|| {
        Error::UnexpectedResponse(format!("transaction {} has no NFT sale event", tx.signature))
    })?;
    let nft = event.nfts.first().ok_or_else(|| {
        Error::UnexpectedResponse(format!("sale event in {} lists no tokens", tx.signature))
    })?;
    Ok(Sale {
        mint: &nft.mint,
        amount: event.amount,
    })
}

pub fn expected_royalty(sale_amount: f64, royalty_bips: u16) -> f64 {
    sale_amount * (f64::from(royalty_bips) / ROYALTY_BIPS_DIVISOR)
}

/// `share` percent of `paid`.
pub fn expected_share(share: u8, paid: f64) -> f64 {
    (f64::from(share) / 100.0) * paid
}

pub fn purchase_line(mint: &str) -> String {
    format!("NFT {mint} was purchased. Checking royalties.")
}

pub fn expectation_line(expected_royalty: f64) -> String {
    format!("Expecting royalty payment of {expected_royalty} for the NFT sale.")
}

/// Outcome for one creator with a non-zero share.
#[derive(Debug, Clone, PartialEq)]
pub enum CreatorPayment {
    Paid {
        address: String,
        /// Every native transfer amount sent to the creator, in order.
        observed: Vec<f64>,
        expected_share: f64,
    },
    Unpaid {
        address: String,
    },
}

impl CreatorPayment {
    pub fn address(&self) -> &str {
        match self {
            CreatorPayment::Paid { address, .. } | CreatorPayment::Unpaid { address } => address,
        }
    }

    /// Stdout line. Unpaid creators have none.
    pub fn report_line(&self) -> Option<String> {
        match self {
            CreatorPayment::Paid {
                address,
                observed,
                expected_share,
            } => {
                let observed = observed
                    .iter()
                    .map(f64::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                Some(format!(
                    "{observed}/{expected_share} of royalty paid for {address}."
                ))
            }
            CreatorPayment::Unpaid { .. } => None,
        }
    }

    pub fn unpaid_message(&self) -> Option<String> {
        match self {
            CreatorPayment::Unpaid { address } => Some(format!("No royalty paid for {address}.")),
            CreatorPayment::Paid { .. } => None,
        }
    }
}

/// Match native transfers to each creator with a non-zero share.
pub fn creator_payments(transfers: &[NativeTransfer], creators: &[Creator]) -> Vec<CreatorPayment> {
    creators
        .iter()
        .filter(|c| c.share > 0)
        .map(|creator| {
            let observed: Vec<f64> = transfers
                .iter()
                .filter(|t| t.to_user_account == creator.address)
                .map(|t| t.amount)
                .collect();
            if observed.is_empty() {
                CreatorPayment::Unpaid {
                    address: creator.address.clone(),
                }
            } else {
                let paid: f64 = observed.iter().sum();
                CreatorPayment::Paid {
                    address: creator.address.clone(),
                    expected_share: expected_share(creator.share, paid),
                    observed,
                }
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoyaltyReport {
    pub mint: String,
    pub royalty_bips: u16,
    pub expected_royalty: f64,
    pub creators: Vec<CreatorPayment>,
}

pub fn evaluate(tx: &ParsedTransaction, metadata: &TokenMetadata) -> Result<RoyaltyReport, Error> {
    let sale = sale_of(tx)?;
    let data = &metadata.on_chain_data.data;
    Ok(RoyaltyReport {
        mint: sale.mint.to_string(),
        royalty_bips: data.seller_fee_basis_points,
        expected_royalty: expected_royalty(sale.amount, data.seller_fee_basis_points),
        creators: creator_payments(&tx.native_transfers, &data.creators),
    })
}
