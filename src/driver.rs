use log::info;

use crate::{error::Error, fetch::Fetcher, load::Loader, warehouse::Connector};

/// Download and load each month in order, stopping at the first failure.
///
/// There is no summary of partial progress, the log shows how far a failed
/// run got.  Re-running skips the downloads that already finished.
pub fn run<K: Connector>(
    months: &[&str],
    fetcher: &Fetcher,
    loader: &Loader<'_, K>,
) -> Result<(), Error> {
    info!("Loading {} months: {}", months.len(), months.join(", "));
    for month in months {
        let parquet_file = fetcher.fetch(month)?;
        loader.load(&parquet_file)?;
    }
    info!("All data loaded into Snowflake.");
    Ok(())
}
