use serde::{Deserialize, Serialize};

/// Per-photo prices of one account, in minor currency units (cents).
///
/// Any field may be missing upstream. Built from the decoded `AccountDetails`
/// payload; a refresh always builds a new catalog and instances are never
/// mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceCatalog {
    pub base_photo_price: Option<f64>,
    pub face_relevance_detection_price: Option<f64>,
    pub hd_backup_price: Option<f64>,
    pub auto_treatment_price: Option<f64>,
    pub ocr_price: Option<f64>,
    pub photo_distribution_price: Option<f64>,
}

/// Feature switches of a combo. Fixed at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboFlags {
    pub backup_hd: bool,
    pub auto_treatment: bool,
    pub ocr: bool,
    pub enable_photo_sales: bool,
    #[serde(rename = "allowCPFsToSeeAllPhotos")]
    pub allow_cpfs_to_see_all_photos: bool,
    pub allow_deleted_production_to_be_found_by_anyone: bool,
    pub uploaded_photos_are_already_sorted: bool,
}

/// A purchasable feature bundle and its last computed display price.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboOptions {
    title: String,
    description: String,
    accent_color: String,
    flags: ComboFlags,
    /// Price of a 1000-photo basket in major currency units, 0 until computed
    computed_price: f64,
}

impl ComboOptions {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        accent_color: impl Into<String>,
        flags: ComboFlags,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            accent_color: accent_color.into(),
            flags,
            computed_price: 0.0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn accent_color(&self) -> &str {
        &self.accent_color
    }

    pub fn flags(&self) -> ComboFlags {
        self.flags
    }

    pub fn computed_price(&self) -> f64 {
        self.computed_price
    }

    /// Only the pricing service writes the display price.
    pub(crate) fn set_computed_price(&mut self, price: f64) {
        self.computed_price = price;
    }
}

/// Cents actually added for each component of one combo
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceBreakdown {
    pub base_photo_cents: f64,
    pub face_relevance_cents: f64,
    pub hd_backup_cents: f64,
    pub auto_treatment_cents: f64,
    pub ocr_cents: f64,
    pub photo_distribution_cents: f64,
    pub total_cents: f64,
    /// Basket price in major currency units, never negative
    pub total_price: f64,
}

impl PriceBreakdown {
    /// Sum the components into `total_cents`
    pub fn calculate_total(&mut self) {
        self.total_cents = self.base_photo_cents
            + self.face_relevance_cents
            + self.hd_backup_cents
            + self.auto_treatment_cents
            + self.ocr_cents
            + self.photo_distribution_cents;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_combo_has_zero_price() {
        let combo = ComboOptions::new("Basic", "Upload only", "#336699", ComboFlags::default());
        assert_eq!(combo.computed_price(), 0.0);
        assert_eq!(combo.title(), "Basic");
        assert_eq!(combo.accent_color(), "#336699");
    }

    #[test]
    fn test_breakdown_total() {
        let mut breakdown = PriceBreakdown {
            base_photo_cents: 10.0,
            face_relevance_cents: 5.0,
            hd_backup_cents: 20.0,
            ..Default::default()
        };
        breakdown.calculate_total();
        assert_eq!(breakdown.total_cents, 35.0);
    }
}
