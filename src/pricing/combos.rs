use crate::pricing::models::{ComboFlags, ComboOptions};

/// The bundles offered on the collections screen, cheapest first.
///
/// Prices start at zero and are filled in by `ComboPriceService`.
pub fn default_combos() -> Vec<ComboOptions> {
    vec![
        ComboOptions::new(
            "Essencial",
            "Reconhecimento facial e entrega das fotos para cada formando.",
            "#4CAF50",
            ComboFlags {
                enable_photo_sales: true,
                ..Default::default()
            },
        ),
        ComboOptions::new(
            "Segurança",
            "Essencial com backup em alta resolução de toda a produção.",
            "#2196F3",
            ComboFlags {
                backup_hd: true,
                enable_photo_sales: true,
                allow_deleted_production_to_be_found_by_anyone: true,
                ..Default::default()
            },
        ),
        ComboOptions::new(
            "Profissional",
            "Backup HD, tratamento automático por IA e leitura de números (OCR).",
            "#9C27B0",
            ComboFlags {
                backup_hd: true,
                auto_treatment: true,
                ocr: true,
                enable_photo_sales: true,
                ..Default::default()
            },
        ),
        ComboOptions::new(
            "Completo",
            "Todos os recursos, incluindo distribuição das fotos para todos os CPFs.",
            "#FF9800",
            ComboFlags {
                backup_hd: true,
                auto_treatment: true,
                ocr: true,
                enable_photo_sales: true,
                allow_cpfs_to_see_all_photos: true,
                allow_deleted_production_to_be_found_by_anyone: true,
                uploaded_photos_are_already_sorted: false,
            },
        ),
        ComboOptions::new(
            "Já Separado",
            "Para fotos enviadas já organizadas por formando; inclui backup HD.",
            "#607D8B",
            ComboFlags {
                backup_hd: true,
                enable_photo_sales: true,
                uploaded_photos_are_already_sorted: true,
                ..Default::default()
            },
        ),
    ]
}
