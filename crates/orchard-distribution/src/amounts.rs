use std::collections::BTreeMap;

use orchard_core::{ChecksumAddress, DecimalAmount, Entry};

use crate::error::DistributionError;

/// Payout amounts: recipient → token → amount.
///
/// On disk this is the JSON object
/// `{ "<recipient>": { "<token>": "<decimal amount>" } }`. Depending on the
/// stage the amounts are either one period's payouts or cumulative totals.
pub type Amounts = BTreeMap<ChecksumAddress, BTreeMap<ChecksumAddress, DecimalAmount>>;

/// Merge one period's payouts into the previous cumulative totals.
///
/// Pairs present in only one side are carried over as they are; pairs
/// present in both are summed.
pub fn accumulate(prev: &Amounts, new: &Amounts) -> Result<Amounts, DistributionError> {
    let mut cumulative = prev.clone();

    for (recipient, tokens) in new {
        let totals = cumulative.entry(*recipient).or_default();
        for (token, amount) in tokens {
            match totals.get_mut(token) {
                Some(total) => {
                    *total = total.checked_add(*amount).ok_or(
                        DistributionError::AmountOverflow {
                            recipient: *recipient,
                            token: *token,
                        },
                    )?;
                }
                None => {
                    totals.insert(*token, *amount);
                }
            }
        }
    }

    tracing::debug!(
        recipients = cumulative.len(),
        new_recipients = cumulative.len() - prev.len(),
        "amounts accumulated"
    );
    Ok(cumulative)
}

/// Flatten amounts into channel entries, ordered by recipient then token.
pub fn entries(amounts: &Amounts) -> Vec<Entry> {
    amounts
        .iter()
        .flat_map(|(recipient, tokens)| {
            tokens
                .iter()
                .map(move |(token, amount)| Entry::new(recipient.0, token.0, amount.value()))
        })
        .collect()
}
