use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use lesser_dashboard::config::Config;
use lesser_dashboard::error::AppError;
use lesser_dashboard::pricing::{
    default_combos, ComboBoard, ComboOptions, ComboPriceCalculator, ComboPriceService,
    HttpCatalogFetcher, PriceCatalog, PriceRefresher, UpdateReport,
};
use std::sync::Arc;
use tracing::info;

/// Execute the prices command
///
/// Fetches the account catalog once and prints every combo with its price.
/// With `watch`, keeps refreshing until Ctrl-C.
pub async fn execute(cfg: &Config, detailed: bool, watch: bool) -> Result<()> {
    let fetcher = Arc::new(HttpCatalogFetcher::from_config(&cfg.account)?);
    if !fetcher.is_authenticated().await {
        println!(
            "{}",
            "No account token configured; prices cannot be fetched.".yellow()
        );
    }

    let service = Arc::new(ComboPriceService::new(
        fetcher,
        cfg.pricing.calculator(),
        cfg.pricing.cache(),
    ));
    let board = ComboBoard::new(service.clone(), default_combos());

    let report = board.update().await;
    print_report(&board, &report, detailed).await;

    if !watch {
        return match report.catalog_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        };
    }

    let interval = cfg.pricing.refresh_interval();
    info!("Watching combo prices (interval: {:?})", interval);
    let refresher = PriceRefresher::new(board.clone(), interval).spawn();

    let mut ticker = tokio::time::interval(interval);
    // The first tick would reprint the table we just showed
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let combos = board.snapshot().await;
                let catalog = service.current_catalog().await;
                print_table(&combos, catalog.as_deref(), service.calculator(), detailed);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Stopping price watch");
                break;
            }
        }
    }

    refresher.abort();
    Ok(())
}

async fn print_report(board: &ComboBoard, report: &UpdateReport, detailed: bool) {
    let service = board.service();
    let combos = board.snapshot().await;
    let catalog = service.current_catalog().await;

    print_table(&combos, catalog.as_deref(), service.calculator(), detailed);

    match &report.catalog_error {
        Some(AppError::AccountClientUnavailable) => {
            println!("{}", "Not logged in: showing last known prices.".yellow());
        }
        Some(e) => {
            println!("{} {}", "Could not refresh prices:".red(), e);
        }
        None => {
            println!(
                "{}",
                format!("✓ {} combo prices updated", report.updated).green()
            );
        }
    }

    for (title, e) in &report.failed {
        println!("  {} {}: {}", "✗".red(), title, e);
    }
}

fn print_table(
    combos: &[ComboOptions],
    catalog: Option<&PriceCatalog>,
    calculator: &ComboPriceCalculator,
    detailed: bool,
) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![
        Cell::new("COMBO").fg(Color::Cyan),
        Cell::new("FEATURES").fg(Color::Cyan),
    ];
    if detailed {
        header.extend([
            Cell::new("BASE").fg(Color::Cyan),
            Cell::new("FACE").fg(Color::Cyan),
            Cell::new("HD").fg(Color::Cyan),
            Cell::new("AI").fg(Color::Cyan),
            Cell::new("OCR").fg(Color::Cyan),
            Cell::new("DIST").fg(Color::Cyan),
            Cell::new("¢/PHOTO").fg(Color::Cyan),
        ]);
    }
    header.push(Cell::new(format!("PRICE ({} PHOTOS)", calculator.basket_size())).fg(Color::Cyan));
    table.set_header(header);

    for combo in combos {
        let mut row = vec![Cell::new(combo.title()), Cell::new(feature_list(combo))];

        if detailed {
            match catalog.map(|c| calculator.breakdown(c, &combo.flags())) {
                Some(Ok(b)) => row.extend(
                    [
                        b.base_photo_cents,
                        b.face_relevance_cents,
                        b.hd_backup_cents,
                        b.auto_treatment_cents,
                        b.ocr_cents,
                        b.photo_distribution_cents,
                        b.total_cents,
                    ]
                    .into_iter()
                    .map(|cents| Cell::new(format!("{:.2}", cents))),
                ),
                _ => row.extend((0..7).map(|_| Cell::new("-"))),
            }
        }

        row.push(Cell::new(format!("R$ {:.2}", combo.computed_price())));
        table.add_row(row);
    }

    println!("{}", table);
}

fn feature_list(combo: &ComboOptions) -> String {
    let flags = combo.flags();
    let features = [
        (flags.backup_hd, "HD backup"),
        (flags.auto_treatment, "AI treatment"),
        (flags.ocr, "OCR"),
        (flags.enable_photo_sales, "sales"),
        (flags.allow_cpfs_to_see_all_photos, "distribution"),
        (flags.allow_deleted_production_to_be_found_by_anyone, "recovery"),
        (flags.uploaded_photos_are_already_sorted, "pre-sorted"),
    ];

    let enabled: Vec<&str> = features
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, name)| *name)
        .collect();

    if enabled.is_empty() {
        "-".to_string()
    } else {
        enabled.join(", ")
    }
}
