use crate::domain::site_copy::{default_text, SITE_COPY_KEYS};
use crate::domain::{Lang, ListingRecord};
use crate::templates::{card, desktop_layout};
use maud::{html, Markup};

fn key_label(key: &str) -> &'static str {
    match key {
        "hero_subtitle" => "Sous-titre de l'en-tête",
        "contact_button" => "Bouton de contact",
        "description_title" => "Titre de la description",
        "whatsapp_button" => "Bouton WhatsApp",
        "why_choose_title" => "Titre « Pourquoi choisir »",
        "why_card1_title" | "why_card2_title" | "why_card3_title" | "why_card4_title" => {
            "Titre de carte"
        }
        "why_card1_desc" | "why_card2_desc" | "why_card3_desc" | "why_card4_desc" => {
            "Texte de carte"
        }
        "contact_title" => "Titre de la section contact",
        "contact_subtitle" => "Sous-titre de la section contact",
        _ => "",
    }
}

/// Site-copy overrides. Empty fields fall back to the built-in text shown as placeholder.
pub fn edit_website_page(record: Option<&ListingRecord>) -> Markup {
    desktop_layout(
        "Textes du site",
        true,
        html! {
            main class="container" {
                h1 { "Textes du site" }

                @match record {
                    None => {
                        p class="alert warning" {
                            "Aucune villa trouvée. Créez d'abord une villa depuis "
                            a href="/admin" { "la fiche villa" } "."
                        }
                    }
                    Some(r) => {
                        p class="muted" {
                            "Laissez un champ vide pour utiliser le texte par défaut (affiché en gris)."
                        }
                        form id="website-text-form" class="stack" {
                            @for key in SITE_COPY_KEYS {
                                (card(&format!("{} ({key})", key_label(key)), html! {
                                    div class="grid two" {
                                        @for lang in [Lang::Fr, Lang::En] {
                                            @let column = format!("{key}_{}", lang.code());
                                            label class="field" {
                                                span { (lang.code().to_uppercase()) }
                                                textarea
                                                    name=(column)
                                                    rows="2"
                                                    placeholder=(default_text(key, lang, &r.location))
                                                {
                                                    (r.text(&column).unwrap_or_default())
                                                }
                                            }
                                        }
                                    }
                                }))
                            }
                            div class="actions" {
                                button type="submit" class="btn" { "💾 Enregistrer les textes" }
                            }
                        }
                    }
                }
            }
        },
    )
}
