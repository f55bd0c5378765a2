pub mod board;
pub mod cache;
pub mod calculator;
pub mod combos;
pub mod fetcher;
pub mod models;
pub mod service;

pub use board::{ComboBoard, PriceRefresher};
pub use cache::{PriceCache, DEFAULT_CACHE_TTL};
pub use calculator::{ComboPriceCalculator, DEFAULT_BASKET_SIZE, DEFAULT_OCR_CENTS};
pub use combos::default_combos;
pub use fetcher::{AccountDetails, AccountDetailsResponse, CatalogFetcher, HttpCatalogFetcher};
pub use models::{ComboFlags, ComboOptions, PriceBreakdown, PriceCatalog};
pub use service::{ComboPriceService, UpdateReport};
