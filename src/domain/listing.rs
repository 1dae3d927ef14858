// src/domain/listing.rs
use crate::ai::{english_key, TRANSLATABLE_FIELDS};
use crate::domain::lang::Lang;
use crate::domain::site_copy::SITE_COPY_KEYS;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// Declares the listing row once: struct fields, column lists and
/// by-name accessors all come from the same two lists.
macro_rules! listing_record {
    (text: [$($text:ident),* $(,)?], int: [$($int:ident),* $(,)?] $(,)?) => {
        /// The single villa managed by the admin panel.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct ListingRecord {
            pub id: Option<i64>,
            $(pub $text: String,)*
            $(pub $int: i64,)*
            pub images: Vec<String>,
            pub is_active: bool,
            pub created_at: Option<NaiveDateTime>,
            pub updated_at: Option<NaiveDateTime>,
        }

        impl ListingRecord {
            pub const TEXT_FIELDS: &'static [&'static str] = &[$(stringify!($text)),*];
            pub const INT_FIELDS: &'static [&'static str] = &[$(stringify!($int)),*];

            pub fn text(&self, name: &str) -> Option<&str> {
                match name {
                    $(stringify!($text) => Some(self.$text.as_str()),)*
                    _ => None,
                }
            }

            pub fn text_mut(&mut self, name: &str) -> Option<&mut String> {
                match name {
                    $(stringify!($text) => Some(&mut self.$text),)*
                    _ => None,
                }
            }

            pub fn int(&self, name: &str) -> Option<i64> {
                match name {
                    $(stringify!($int) => Some(self.$int),)*
                    _ => None,
                }
            }

            pub fn int_mut(&mut self, name: &str) -> Option<&mut i64> {
                match name {
                    $(stringify!($int) => Some(&mut self.$int),)*
                    _ => None,
                }
            }
        }
    };
}

listing_record! {
    text: [
        reference, title, title_en, location, distance_city,
        description, description_en, pool_size,
        features, features_en, equipment, equipment_en,
        business_info, business_info_en, investment_benefits, investment_benefits_en,
        documents, documents_en,
        contact_phone, contact_email, contact_website,
        hero_subtitle_fr, hero_subtitle_en, contact_button_fr, contact_button_en,
        description_title_fr, description_title_en, whatsapp_button_fr, whatsapp_button_en,
        why_choose_title_fr, why_choose_title_en,
        why_card1_title_fr, why_card1_title_en, why_card1_desc_fr, why_card1_desc_en,
        why_card2_title_fr, why_card2_title_en, why_card2_desc_fr, why_card2_desc_en,
        why_card3_title_fr, why_card3_title_en, why_card3_desc_fr, why_card3_desc_en,
        why_card4_title_fr, why_card4_title_en, why_card4_desc_fr, why_card4_desc_en,
        contact_title_fr, contact_title_en, contact_subtitle_fr, contact_subtitle_en,
    ],
    int: [price, terrain_area, built_area, bedrooms],
}

/// Converts a form value to an integer, `default` when blank or invalid.
pub fn safe_int(value: Option<&str>, default: i64) -> i64 {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl ListingRecord {
    /// Fields edited on the main admin form (facts, marketing blocks, contact).
    pub fn admin_form_fields() -> impl Iterator<Item = &'static str> {
        Self::TEXT_FIELDS
            .iter()
            .copied()
            .filter(|f| !is_site_copy_column(f))
            .chain(Self::INT_FIELDS.iter().copied())
    }

    /// Columns edited on the "website texts" page.
    pub fn site_copy_fields() -> impl Iterator<Item = &'static str> {
        Self::TEXT_FIELDS.iter().copied().filter(|f| is_site_copy_column(f))
    }

    /// Form semantics: every listed field is overwritten, absent keys become
    /// empty / zero.
    pub fn apply_form<'a>(
        &mut self,
        form: &HashMap<String, String>,
        fields: impl IntoIterator<Item = &'a str>,
    ) {
        for name in fields {
            let raw = form.get(name).map(String::as_str);
            if let Some(slot) = self.int_mut(name) {
                *slot = safe_int(raw, 0);
            } else if let Some(slot) = self.text_mut(name) {
                *slot = raw.unwrap_or_default().to_string();
            }
        }
    }

    /// Shallow merge of a key/value record (import pipeline output).
    /// Only keys present are touched; unknown keys and mistyped values are skipped.
    pub fn apply_merged(&mut self, merged: &Map<String, Value>) {
        for (key, value) in merged {
            match value {
                Value::String(s) => {
                    if let Some(slot) = self.text_mut(key) {
                        *slot = s.clone();
                    }
                }
                Value::Number(n) => {
                    if let (Some(slot), Some(v)) = (self.int_mut(key), n.as_i64()) {
                        *slot = v;
                    }
                }
                _ => {}
            }
        }
    }

    /// Non-blank French text eligible for translation: the marketing fields
    /// plus every `_fr` site-copy override.
    pub fn translation_source(&self) -> BTreeMap<String, String> {
        TRANSLATABLE_FIELDS
            .iter()
            .copied()
            .chain(Self::site_copy_fields().filter(|f| f.ends_with("_fr")))
            .filter_map(|name| {
                self.text(name)
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    /// Writes `_en` values; returns how many were applied.
    pub fn apply_translations(&mut self, translations: &BTreeMap<String, String>) -> usize {
        let mut applied = 0;
        for (key, value) in translations {
            if !key.ends_with("_en") {
                continue;
            }
            if let Some(slot) = self.text_mut(key) {
                *slot = value.clone();
                applied += 1;
            }
        }
        applied
    }

    /// Empties the English twin of every translatable fact field. An import
    /// replaces the French facts, so English written for the old text must go.
    pub fn clear_english_twins(&mut self) {
        for name in TRANSLATABLE_FIELDS {
            if let Some(slot) = self.text_mut(&english_key(name)) {
                slot.clear();
            }
        }
    }

    /// Read model for one language. English text fields are never filled
    /// from French: an untranslated field is `None`.
    pub fn localized(&self, lang: Lang) -> LocalizedListing {
        let pick = |fr: &str, en: &str| -> Option<String> {
            let v = match lang {
                Lang::Fr => fr,
                Lang::En => en,
            };
            (!v.trim().is_empty()).then(|| v.to_string())
        };
        let plain = |v: &str| (!v.trim().is_empty()).then(|| v.to_string());

        LocalizedListing {
            id: self.id,
            lang,
            reference: self.reference.clone(),
            title: pick(&self.title, &self.title_en),
            price: self.price,
            location: plain(&self.location),
            distance_city: plain(&self.distance_city),
            description: pick(&self.description, &self.description_en),
            terrain_area: self.terrain_area,
            built_area: self.built_area,
            bedrooms: self.bedrooms,
            pool_size: plain(&self.pool_size),
            features: pick(&self.features, &self.features_en),
            equipment: pick(&self.equipment, &self.equipment_en),
            business_info: pick(&self.business_info, &self.business_info_en),
            investment_benefits: pick(&self.investment_benefits, &self.investment_benefits_en),
            documents: pick(&self.documents, &self.documents_en),
            images: self.images.clone(),
            contact_phone: plain(&self.contact_phone),
            contact_email: plain(&self.contact_email),
            contact_website: plain(&self.contact_website),
            is_active: self.is_active,
        }
    }
}

fn is_site_copy_column(name: &str) -> bool {
    SITE_COPY_KEYS
        .iter()
        .any(|base| name.strip_prefix(base).is_some_and(|s| s == "_fr" || s == "_en"))
}

pub fn lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct LocalizedListing {
    pub id: Option<i64>,
    pub lang: Lang,
    pub reference: String,
    pub title: Option<String>,
    pub price: i64,
    pub location: Option<String>,
    pub distance_city: Option<String>,
    pub description: Option<String>,
    pub terrain_area: i64,
    pub built_area: i64,
    pub bedrooms: i64,
    pub pool_size: Option<String>,
    pub features: Option<String>,
    pub equipment: Option<String>,
    pub business_info: Option<String>,
    pub investment_benefits: Option<String>,
    pub documents: Option<String>,
    pub images: Vec<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub contact_website: Option<String>,
    pub is_active: bool,
}
