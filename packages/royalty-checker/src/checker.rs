//! End-to-end royalty check for a single sale transaction.

use crate::client::IndexerApi;
use crate::royalty::{self, RoyaltyReport};
use crate::{Config, Error};
use std::io::Write;
use tracing::{info, warn};

/// Usage hint printed when no `--signature` is given.
pub const SIGNATURE_USAGE: &str =
    "Please provide a signature (e.g. `royalty-checker --signature=<...>`)";

/// The CLI signature, or an empty one after writing the usage hint to `err`.
///
/// A missing signature does not stop the run; the indexer rejects the empty
/// value downstream.
pub fn signature_or_usage<W: Write>(
    signature: Option<String>,
    err: &mut W,
) -> Result<String, Error> {
    match signature {
        Some(sig) => Ok(sig),
        None => {
            writeln!(err, "{SIGNATURE_USAGE}")?;
            Ok(String::new())
        }
    }
}

/// Fetch the sale transaction and its token metadata, then write the royalty
/// comparison to `out`.
///
/// Lines are written as soon as their data is known, so a failed metadata
/// lookup still leaves the purchase line behind. The API key is resolved
/// before any request goes out.
pub async fn check_royalty_payments<A, W>(
    config: &Config,
    api: &A,
    signature: &str,
    out: &mut W,
) -> Result<RoyaltyReport, Error>
where
    A: IndexerApi,
    W: Write,
{
    let api_key = config.require_api_key()?;

    let txn = api.parse_transaction(signature, api_key).await?;
    let sale = royalty::sale_of(&txn)?;
    info!(signature, mint = sale.mint, amount = sale.amount, "Parsed NFT sale");
    writeln!(out, "{}", royalty::purchase_line(sale.mint))?;

    let metadata = api.token_metadata(sale.mint, api_key).await?;
    let report = royalty::evaluate(&txn, &metadata)?;
    info!(
        bips = report.royalty_bips,
        creators = metadata.on_chain_data.data.creators.len(),
        "Loaded token metadata"
    );
    writeln!(out, "{}", royalty::expectation_line(report.expected_royalty))?;

    for payment in &report.creators {
        if let Some(line) = payment.report_line() {
            writeln!(out, "{line}")?;
        }
        if let Some(msg) = payment.unpaid_message() {
            warn!(creator = payment.address(), "{msg}");
        }
    }

    Ok(report)
}
