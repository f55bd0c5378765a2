use crate::error::AppError;
use crate::pricing::models::{ComboFlags, PriceBreakdown, PriceCatalog};

/// Number of photos a combo price is quoted for
pub const DEFAULT_BASKET_SIZE: u32 = 1000;

/// Cents per photo charged for OCR when the account has no OCR price
pub const DEFAULT_OCR_CENTS: f64 = 1.15;

/// Computes combo prices from a price catalog
#[derive(Debug, Clone)]
pub struct ComboPriceCalculator {
    basket_size: u32,
    ocr_default_cents: f64,
}

impl Default for ComboPriceCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_BASKET_SIZE, DEFAULT_OCR_CENTS)
    }
}

impl ComboPriceCalculator {
    pub fn new(basket_size: u32, ocr_default_cents: f64) -> Self {
        Self {
            basket_size,
            ocr_default_cents,
        }
    }

    pub fn basket_size(&self) -> u32 {
        self.basket_size
    }

    /// Price of one basket in major currency units
    pub fn calculate(&self, catalog: &PriceCatalog, flags: &ComboFlags) -> Result<f64, AppError> {
        Ok(self.breakdown(catalog, flags)?.total_price)
    }

    /// Per-component cents for a combo plus the resulting basket price.
    ///
    /// Only components the combo pays for are validated, so a broken price
    /// only fails the combos that use it.
    pub fn breakdown(
        &self,
        catalog: &PriceCatalog,
        flags: &ComboFlags,
    ) -> Result<PriceBreakdown, AppError> {
        let mut breakdown = PriceBreakdown {
            base_photo_cents: component("basePhotoPrice", catalog.base_photo_price, 0.0)?,
            // Face relevance detection is part of every combo
            face_relevance_cents: component(
                "faceRelevanceDetectionPrice",
                catalog.face_relevance_detection_price,
                0.0,
            )?,
            ..Default::default()
        };

        if flags.backup_hd {
            breakdown.hd_backup_cents = component("hdBackupPrice", catalog.hd_backup_price, 0.0)?;
        }

        if flags.auto_treatment {
            breakdown.auto_treatment_cents =
                component("autoTreatmentPrice", catalog.auto_treatment_price, 0.0)?;
        }

        if flags.ocr {
            breakdown.ocr_cents = component("ocrPrice", catalog.ocr_price, self.ocr_default_cents)?;
        }

        if flags.allow_cpfs_to_see_all_photos {
            breakdown.photo_distribution_cents = component(
                "photoDistributionPrice",
                catalog.photo_distribution_price,
                0.0,
            )?;
        }

        // No account discount is subtracted from combo prices.
        breakdown.calculate_total();

        // cents per photo -> major units per basket
        let total = breakdown.total_cents / 100.0 * f64::from(self.basket_size);
        breakdown.total_price = total.max(0.0);

        Ok(breakdown)
    }
}

fn component(field: &'static str, price: Option<f64>, default: f64) -> Result<f64, AppError> {
    let value = price.unwrap_or(default);
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::InvalidPrice { field, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn scenario_catalog() -> PriceCatalog {
        PriceCatalog {
            base_photo_price: Some(10.0),
            face_relevance_detection_price: Some(5.0),
            hd_backup_price: Some(20.0),
            auto_treatment_price: Some(0.0),
            ocr_price: None,
            photo_distribution_price: Some(0.0),
        }
    }

    fn zero_catalog() -> PriceCatalog {
        PriceCatalog {
            base_photo_price: Some(0.0),
            face_relevance_detection_price: Some(0.0),
            hd_backup_price: Some(0.0),
            auto_treatment_price: Some(0.0),
            ocr_price: Some(0.0),
            photo_distribution_price: Some(0.0),
        }
    }

    fn all_flag_combinations() -> Vec<ComboFlags> {
        (0u8..128)
            .map(|bits| ComboFlags {
                backup_hd: bits & 1 != 0,
                auto_treatment: bits & 2 != 0,
                ocr: bits & 4 != 0,
                enable_photo_sales: bits & 8 != 0,
                allow_cpfs_to_see_all_photos: bits & 16 != 0,
                allow_deleted_production_to_be_found_by_anyone: bits & 32 != 0,
                uploaded_photos_are_already_sorted: bits & 64 != 0,
            })
            .collect()
    }

    #[test]
    fn test_scenario_hd_backup_only() {
        let flags = ComboFlags {
            backup_hd: true,
            ..Default::default()
        };
        let price = ComboPriceCalculator::default()
            .calculate(&scenario_catalog(), &flags)
            .unwrap();
        assert!((price - 350.0).abs() < EPSILON, "got {}", price);
    }

    #[test]
    fn test_scenario_no_flags() {
        let price = ComboPriceCalculator::default()
            .calculate(&scenario_catalog(), &ComboFlags::default())
            .unwrap();
        assert!((price - 150.0).abs() < EPSILON, "got {}", price);
    }

    #[test]
    fn test_scenario_ocr_uses_default_when_missing() {
        let catalog = PriceCatalog {
            ocr_price: None,
            ..zero_catalog()
        };
        let flags = ComboFlags {
            ocr: true,
            ..Default::default()
        };
        let breakdown = ComboPriceCalculator::default()
            .breakdown(&catalog, &flags)
            .unwrap();
        assert_eq!(breakdown.ocr_cents, DEFAULT_OCR_CENTS);
        assert!((breakdown.total_price - 11.5).abs() < EPSILON);
    }

    #[test]
    fn test_missing_fields_other_than_ocr_count_as_zero() {
        let flags = ComboFlags {
            backup_hd: true,
            auto_treatment: true,
            allow_cpfs_to_see_all_photos: true,
            ..Default::default()
        };
        let price = ComboPriceCalculator::default()
            .calculate(&PriceCatalog::default(), &flags)
            .unwrap();
        assert_eq!(price, 0.0);
    }

    #[test]
    fn test_face_relevance_always_charged() {
        let catalog = PriceCatalog {
            face_relevance_detection_price: Some(2.0),
            ..Default::default()
        };
        let calculator = ComboPriceCalculator::default();
        for flags in all_flag_combinations() {
            let breakdown = calculator.breakdown(&catalog, &flags).unwrap();
            assert_eq!(breakdown.face_relevance_cents, 2.0);
        }
    }

    #[test]
    fn test_zero_catalog_is_free_for_every_combo() {
        let calculator = ComboPriceCalculator::default();
        for flags in all_flag_combinations() {
            let price = calculator.calculate(&zero_catalog(), &flags).unwrap();
            assert_eq!(price, 0.0);
        }
    }

    #[test]
    fn test_enabling_a_flag_never_lowers_the_price() {
        let catalog = PriceCatalog {
            base_photo_price: Some(3.0),
            face_relevance_detection_price: Some(1.0),
            hd_backup_price: Some(2.5),
            auto_treatment_price: Some(4.0),
            ocr_price: None,
            photo_distribution_price: Some(0.75),
        };
        let calculator = ComboPriceCalculator::default();

        for flags in all_flag_combinations() {
            let before = calculator.calculate(&catalog, &flags).unwrap();
            let toggles: [fn(&mut ComboFlags); 7] = [
                |f: &mut ComboFlags| f.backup_hd = true,
                |f: &mut ComboFlags| f.auto_treatment = true,
                |f: &mut ComboFlags| f.ocr = true,
                |f: &mut ComboFlags| f.enable_photo_sales = true,
                |f: &mut ComboFlags| f.allow_cpfs_to_see_all_photos = true,
                |f: &mut ComboFlags| f.allow_deleted_production_to_be_found_by_anyone = true,
                |f: &mut ComboFlags| f.uploaded_photos_are_already_sorted = true,
            ];
            for toggle in toggles {
                let mut enabled = flags;
                toggle(&mut enabled);
                let after = calculator.calculate(&catalog, &enabled).unwrap();
                assert!(after >= before, "{:?} -> {:?}", flags, enabled);
            }
        }
    }

    #[test]
    fn test_calculate_is_deterministic() {
        let calculator = ComboPriceCalculator::default();
        let flags = ComboFlags {
            backup_hd: true,
            ocr: true,
            ..Default::default()
        };
        let first = calculator.calculate(&scenario_catalog(), &flags).unwrap();
        let second = calculator.calculate(&scenario_catalog(), &flags).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_never_negative() {
        let calculator = ComboPriceCalculator::default();
        for flags in all_flag_combinations() {
            let price = calculator.calculate(&PriceCatalog::default(), &flags).unwrap();
            assert!(price >= 0.0);
            let price = calculator.calculate(&zero_catalog(), &flags).unwrap();
            assert!(price >= 0.0);
        }
    }

    #[test]
    fn test_invalid_price_only_fails_combos_that_use_it() {
        let catalog = PriceCatalog {
            hd_backup_price: Some(-1.0),
            ..scenario_catalog()
        };
        let calculator = ComboPriceCalculator::default();

        assert!(calculator
            .calculate(&catalog, &ComboFlags::default())
            .is_ok());

        let err = calculator
            .calculate(
                &catalog,
                &ComboFlags {
                    backup_hd: true,
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidPrice {
                field: "hdBackupPrice",
                ..
            }
        ));
    }

    #[test]
    fn test_custom_basket_size() {
        let calculator = ComboPriceCalculator::new(500, DEFAULT_OCR_CENTS);
        let price = calculator
            .calculate(&scenario_catalog(), &ComboFlags::default())
            .unwrap();
        assert!((price - 75.0).abs() < EPSILON);
    }

    #[test]
    fn test_converts_to_major_units_before_scaling() {
        let catalog = PriceCatalog {
            base_photo_price: Some(1.15),
            ..Default::default()
        };
        let price = ComboPriceCalculator::default()
            .calculate(&catalog, &ComboFlags::default())
            .unwrap();
        assert_eq!(price.to_bits(), (1.15f64 / 100.0 * 1000.0).to_bits());
    }
}
