//! `list` command: load a region and print one page of venues.

use dinescout_core::{
    visible_pages, AppConfig, CategoryFilter, DiscoveryError, QueryPage, SortOrder, Venue,
};
use dinescout_places::Geocoder;

use crate::CliExplorer;

#[derive(Debug)]
pub(crate) struct ListArgs {
    pub city: Option<String>,
    pub search_city: Option<String>,
    pub query: String,
    pub category: CategoryFilter,
    pub sort: SortOrder,
    pub page: usize,
    pub images: bool,
}

/// Loads the requested region and prints the filtered page.
///
/// Provider failures are reported as a message, not an error exit.
///
/// # Errors
///
/// Returns an error only if the geocoder client cannot be constructed.
pub(crate) async fn run_list(
    explorer: &CliExplorer,
    config: &AppConfig,
    args: ListArgs,
) -> anyhow::Result<()> {
    let loaded = match (&args.search_city, &args.city) {
        (Some(text), _) => {
            let geocoder = Geocoder::new(
                &config.geocoder_url,
                config.request_timeout_secs,
                &config.user_agent,
            )?;
            explorer.search_city(&geocoder, text).await
        }
        (None, Some(name)) => explorer.select_preset(name).await,
        (None, None) => {
            let name = explorer.presets().default_name().to_string();
            explorer.select_preset(&name).await
        }
    };

    match loaded {
        Ok(outcome) => tracing::debug!(?outcome, "region load finished"),
        Err(DiscoveryError::NotFound { .. }) if args.search_city.is_some() => {
            println!(
                "no city matched '{}'",
                args.search_city.as_deref().unwrap_or_default()
            );
            return Ok(());
        }
        Err(error) => {
            tracing::warn!(%error, "venue list unavailable");
            println!("could not load venues right now; try again later");
            return Ok(());
        }
    }

    explorer.set_search_text(args.query);
    explorer.set_category(args.category);
    explorer.set_sort(args.sort);
    explorer.set_page(args.page);

    let label = explorer
        .active_region()
        .map(|r| r.label)
        .unwrap_or_default();
    print_page(&label, args.category, &explorer.current_page(), args.images);
    Ok(())
}

fn print_page(label: &str, category: CategoryFilter, page: &QueryPage, images: bool) {
    println!(
        "{label} | {} | {} result(s)",
        category.display_label(),
        page.total_matches
    );

    if page.items.is_empty() {
        if page.total_matches == 0 {
            println!("no venues match these filters");
        } else {
            println!(
                "page {} is past the end ({} page(s))",
                page.page, page.total_pages
            );
        }
        return;
    }

    println!();
    println!("{:<8}{:<36}{:<20}ID", "RATING", "NAME", "KIND");
    for venue in &page.items {
        println!("{}", format_row(venue));
        if images {
            println!("{}", format_image_line(venue));
        }
    }

    let strip = pagination_strip(page.page, page.total_pages);
    if !strip.is_empty() {
        println!();
        println!("page {}/{}  {strip}", page.page, page.total_pages);
    }
}

pub(crate) fn format_row(venue: &Venue) -> String {
    let name = if venue.name.chars().count() > 34 {
        format!("{}...", venue.name.chars().take(31).collect::<String>())
    } else {
        venue.name.clone()
    };
    format!(
        "{:<8}{:<36}{:<20}{}",
        format!("{:.1}", venue.rating),
        name,
        venue.subtitle(),
        venue.id
    )
}

/// Card illustration URL, indented under the name column.
pub(crate) fn format_image_line(venue: &Venue) -> String {
    format!("{:<8}{}", "", venue.image_theme().image_url())
}

/// Page numbers of the pagination strip, with the current page bracketed.
pub(crate) fn pagination_strip(current: usize, total_pages: usize) -> String {
    visible_pages(total_pages)
        .into_iter()
        .map(|n| {
            if n == current {
                format!("[{n}]")
            } else {
                n.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
