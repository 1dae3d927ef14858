// src/domain/site_copy.rs
use crate::domain::lang::Lang;
use crate::domain::listing::ListingRecord;

/// Editable site texts. Each key is stored twice, `{key}_fr` and `{key}_en`.
pub const SITE_COPY_KEYS: [&str; 15] = [
    "hero_subtitle",
    "contact_button",
    "description_title",
    "whatsapp_button",
    "why_choose_title",
    "why_card1_title",
    "why_card1_desc",
    "why_card2_title",
    "why_card2_desc",
    "why_card3_title",
    "why_card3_desc",
    "why_card4_title",
    "why_card4_desc",
    "contact_title",
    "contact_subtitle",
];

/// Built-in text used when the admin left an override empty.
/// Always in the requested language.
pub fn default_text(key: &str, lang: Lang, location: &str) -> String {
    let (fr, en) = match key {
        "hero_subtitle" => (
            "Découvrez cette villa d'exception à Marrakech",
            "Discover this exceptional villa in Marrakech",
        ),
        "contact_button" => ("Nous Contacter", "Contact Us"),
        "description_title" => ("Une Villa d'Exception", "An Exceptional Villa"),
        "whatsapp_button" => (
            "Prendre Rendez-vous sur WhatsApp",
            "Schedule a Visit on WhatsApp",
        ),
        "why_choose_title" => ("Pourquoi Choisir Cette Villa ?", "Why Choose This Villa?"),
        "why_card1_title" => ("Emplacement Premium", "Premium Location"),
        "why_card1_desc" => {
            return match lang {
                Lang::Fr => format!(
                    "Située à {location}, dans l'un des quartiers les plus prisés de Marrakech"
                ),
                Lang::En => {
                    format!("Located in {location}, one of Marrakech's most sought-after areas")
                }
            }
        }
        "why_card2_title" => ("Architecture Moderne", "Modern Architecture"),
        "why_card2_desc" => (
            "Design contemporain alliant luxe, confort et authenticité marocaine",
            "Contemporary design combining luxury, comfort and Moroccan authenticity",
        ),
        "why_card3_title" => ("Finitions Haut de Gamme", "Premium Finishes"),
        "why_card3_desc" => (
            "Matériaux nobles et équipements premium pour un confort optimal",
            "Noble materials and premium equipment for optimal comfort",
        ),
        "why_card4_title" => ("Espaces Extérieurs", "Outdoor Spaces"),
        "why_card4_desc" => (
            "Jardin paysager, terrasses et espaces de vie en plein air exceptionnels",
            "Landscaped garden, terraces and exceptional outdoor living spaces",
        ),
        "contact_title" => ("Intéressé par cette Villa ?", "Interested in this Villa?"),
        "contact_subtitle" => (
            "Contactez-nous dès aujourd'hui pour organiser une visite privée",
            "Contact us today to arrange a private viewing",
        ),
        _ => ("", ""),
    };
    match lang {
        Lang::Fr => fr.to_string(),
        Lang::En => en.to_string(),
    }
}

/// Override from the record if set, otherwise the default for `lang`.
pub fn site_text(record: &ListingRecord, key: &str, lang: Lang) -> String {
    let column = format!("{key}_{}", lang.code());
    match record.text(&column) {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => default_text(key, lang, &record.location),
    }
}
