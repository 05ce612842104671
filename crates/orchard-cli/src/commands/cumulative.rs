//! `orchard cumulative`: merge a period's payouts into cumulative amounts.

use clap::Args;
use std::path::PathBuf;

use orchard_distribution::{accumulate, Amounts};

use super::{read_json, write_json};

#[derive(Args, Debug)]
pub struct CumulativeArgs {
    /// Cumulative amounts after the previous period.
    #[arg(long)]
    pub prev: PathBuf,

    /// Payouts of the new period.
    #[arg(long)]
    pub new: PathBuf,

    /// Where to write the merged cumulative amounts.
    #[arg(short, long)]
    pub output: PathBuf,
}

pub async fn run(args: &CumulativeArgs) -> anyhow::Result<()> {
    let prev: Amounts = read_json(&args.prev).await?;
    let new: Amounts = read_json(&args.new).await?;

    let cumulative = accumulate(&prev, &new)?;
    write_json(&args.output, &cumulative).await?;

    tracing::info!(
        output = %args.output.display(),
        recipients = cumulative.len(),
        "cumulative amounts written"
    );
    Ok(())
}
