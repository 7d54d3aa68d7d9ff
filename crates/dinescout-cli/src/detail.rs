use dinescout_core::{DiscoveryError, VenueDetail};

use crate::CliExplorer;

/// Fetches and prints one venue's detail record.
///
/// # Errors
///
/// Never fails on provider errors; they are printed as messages.
pub(crate) async fn run_detail(explorer: &CliExplorer, id: &str) -> anyhow::Result<()> {
    match explorer.detail(id).await {
        Ok(detail) => print!("{}", render_detail(&detail)),
        Err(DiscoveryError::NotFound { .. }) => println!("venue '{id}' not found"),
        Err(error) => {
            tracing::warn!(venue_id = id, %error, "detail fetch failed");
            println!("could not load venue '{id}' right now; try again later");
        }
    }
    Ok(())
}

pub(crate) fn render_detail(detail: &VenueDetail) -> String {
    let or_dash = |value: Option<&str>| value.unwrap_or("\u{2014}").to_string();
    format!(
        "{}\n{}\n\naddress     {}\nphone       {}\nwebsite     {}\nmap         {}\ndirections  {}\n",
        detail.headline(),
        detail.name,
        or_dash(detail.address.as_deref()),
        or_dash(detail.phone.as_deref()),
        or_dash(detail.website.as_deref()),
        detail.map_embed_url(),
        detail.directions_url(),
    )
}
