use metrics::{counter, describe_counter, describe_gauge, gauge};

/// Register metric descriptions (can be called multiple times safely)
pub fn init_metric_descriptions() {
    describe_counter!(
        "combo_price_cache_lookups_total",
        "Price catalog cache lookups by result (hit/miss)"
    );
    describe_counter!(
        "combo_price_catalog_fetches_total",
        "Account price catalog fetches by status"
    );
    describe_counter!(
        "combo_price_failures_total",
        "Combos whose price could not be computed"
    );
    describe_gauge!(
        "combo_price_current",
        "Last computed price per combo in major currency units"
    );
}

/// Record a cache lookup
pub fn record_cache_lookup(hit: bool) {
    counter!(
        "combo_price_cache_lookups_total",
        "result" => if hit { "hit" } else { "miss" },
    )
    .increment(1);
}

/// Record a catalog fetch
pub fn record_catalog_fetch(status: &'static str) {
    counter!("combo_price_catalog_fetches_total", "status" => status).increment(1);
}

/// Record a combo price failure
pub fn record_combo_failure(combo: &str, error_type: &'static str) {
    counter!(
        "combo_price_failures_total",
        "combo" => combo.to_string(),
        "error_type" => error_type,
    )
    .increment(1);
}

/// Update the displayed price of a combo
pub fn update_combo_price(combo: &str, price: f64) {
    gauge!("combo_price_current", "combo" => combo.to_string()).set(price);
}
