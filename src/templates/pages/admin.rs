use crate::domain::ListingRecord;
use crate::templates::components::{number_input, text_input, textarea_field};
use crate::templates::{card, desktop_layout};
use maud::{html, Markup};

/// French/English pairs of marketing blocks, in form order.
const BILINGUAL_BLOCKS: [(&str, &str); 6] = [
    ("description", "Description"),
    ("features", "Caractéristiques (une par ligne)"),
    ("equipment", "Équipements"),
    ("business_info", "Activité commerciale"),
    ("investment_benefits", "Atouts investissement"),
    ("documents", "Documents disponibles"),
];

pub struct AdminVm<'a> {
    pub record: &'a ListingRecord,
    /// False when no AI credential is configured; AI actions are then disabled.
    pub ai_enabled: bool,
}

pub fn admin_page(vm: &AdminVm<'_>) -> Markup {
    let r = vm.record;

    desktop_layout(
        "Fiche villa",
        true,
        html! {
            main class="container" {
                h1 { "Fiche villa" }

                @if !vm.ai_enabled {
                    p class="alert warning" {
                        "OPENROUTER_API_KEY n'est pas configurée : import PDF, amélioration et traduction sont indisponibles."
                    }
                }

                (card("Import depuis une brochure PDF", html! {
                    p class="muted" {
                        "Le texte du PDF est analysé par l'IA puis traduit en anglais. "
                        "Les champs extraits remplacent ceux de la fiche."
                    }
                    input type="file" id="pdf-input" accept="application/pdf,.pdf" disabled[!vm.ai_enabled];
                    div id="pdf-status" class="status" {}
                }))

                form id="villa-form" class="stack" {
                    (card("Informations principales", html! {
                        div class="grid" {
                            (text_input("reference", "Référence", &r.reference))
                            (number_input("price", "Prix (€)", r.price))
                            (text_input("title", "Titre (FR)", &r.title))
                            (text_input("title_en", "Title (EN)", &r.title_en))
                            (text_input("location", "Emplacement", &r.location))
                            (text_input("distance_city", "Distance du centre", &r.distance_city))
                            (number_input("terrain_area", "Terrain (m²)", r.terrain_area))
                            (number_input("built_area", "Surface bâtie (m²)", r.built_area))
                            (number_input("bedrooms", "Chambres", r.bedrooms))
                            (text_input("pool_size", "Piscine", &r.pool_size))
                        }
                    }))

                    @for (name, label) in BILINGUAL_BLOCKS {
                        @let en = format!("{name}_en");
                        (card(label, html! {
                            div class="grid two" {
                                (textarea_field(name, &format!("{label} (FR)"), r.text(name).unwrap_or_default(), 6, true))
                                (textarea_field(&en, &format!("{label} (EN)"), r.text(&en).unwrap_or_default(), 6, false))
                            }
                        }))
                    }

                    (card("Contact", html! {
                        div class="grid" {
                            (text_input("contact_phone", "Téléphone / WhatsApp", &r.contact_phone))
                            (text_input("contact_email", "Email", &r.contact_email))
                            (text_input("contact_website", "Site web", &r.contact_website))
                        }
                    }))

                    div class="actions" {
                        button type="submit" class="btn" { "💾 Enregistrer" }
                        button type="button" id="translate-btn" class="btn secondary" disabled[!vm.ai_enabled] {
                            "🌍 Traduire en anglais"
                        }
                    }
                }

                (card("Photos", html! {
                    input type="file" id="image-input" accept="image/png,image/jpeg,image/webp" multiple;
                    div id="gallery" class="gallery" {
                        @for image in &r.images {
                            figure data-filename=(image) {
                                img src=(format!("/static/uploads/{image}")) alt="";
                                button type="button" class="btn-delete" data-filename=(image) { "Supprimer" }
                            }
                        }
                    }
                }))

                (card("Zone de danger", html! {
                    p { "Supprime la fiche et toutes les photos. Tapez SUPPRIMER pour confirmer." }
                    form id="reset-form" class="inline" {
                        input type="text" name="confirmation" placeholder="SUPPRIMER" autocomplete="off";
                        button type="submit" class="btn danger" { "Tout réinitialiser" }
                    }
                }))
            }
        },
    )
}
