// templates/pages/home.rs
use crate::domain::listing::lines;
use crate::domain::site_copy::site_text;
use crate::domain::{Lang, ListingRecord};
use crate::templates::{card, site_layout};
use maud::{html, Markup};

fn t(lang: Lang, fr: &'static str, en: &'static str) -> &'static str {
    match lang {
        Lang::Fr => fr,
        Lang::En => en,
    }
}

/// `1250000` -> `1 250 000 €`
pub fn format_price(price: i64) -> String {
    let digits = price.abs().to_string();
    let mut out = String::with_capacity(digits.len() + 6);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    if price < 0 {
        out.insert(0, '-');
    }
    out.push_str(" €");
    out
}

fn whatsapp_link(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    (!digits.is_empty()).then(|| format!("https://wa.me/{digits}"))
}

fn bullet_section(title: &str, body: Option<&String>) -> Markup {
    html! {
        @if let Some(body) = body {
            (card(title, html! {
                ul {
                    @for line in lines(body) {
                        li { (line) }
                    }
                }
            }))
        }
    }
}

pub fn home_page(record: Option<&ListingRecord>, lang: Lang) -> Markup {
    let Some(record) = record.filter(|r| r.is_active) else {
        return site_layout(
            "Villa",
            lang,
            html! {
                main class="container narrow" {
                    h1 { (t(lang, "Bientôt disponible", "Coming soon")) }
                    p class="lead" {
                        (t(lang, "Cette villa sera présentée très prochainement.", "This villa will be presented very soon."))
                    }
                }
            },
        );
    };

    let view = record.localized(lang);
    let copy = |key: &str| site_text(record, key, lang);
    let page_title = view.title.clone().unwrap_or_else(|| "Villa".to_string());

    site_layout(
        &page_title,
        lang,
        html! {
            section class="hero" {
                @if let Some(first) = view.images.first() {
                    img src=(format!("/static/uploads/{first}")) alt=(page_title);
                }
                div class="hero-text" {
                    @if let Some(title) = &view.title {
                        h1 { (title) }
                    }
                    p class="lead" { (copy("hero_subtitle")) }
                    @if view.price > 0 {
                        p class="price" { (format_price(view.price)) }
                    }
                    a href="#contact" class="btn" { (copy("contact_button")) }
                }
            }

            main class="container" {
                section class="facts" {
                    @if let Some(location) = &view.location {
                        div { strong { (t(lang, "Emplacement", "Location")) } span { (location) } }
                    }
                    @if let Some(distance) = &view.distance_city {
                        div { strong { (t(lang, "Distance du centre", "Distance to city")) } span { (distance) } }
                    }
                    @if view.terrain_area > 0 {
                        div { strong { (t(lang, "Terrain", "Land")) } span { (view.terrain_area) " m²" } }
                    }
                    @if view.built_area > 0 {
                        div { strong { (t(lang, "Surface bâtie", "Built area")) } span { (view.built_area) " m²" } }
                    }
                    @if view.bedrooms > 0 {
                        div { strong { (t(lang, "Chambres", "Bedrooms")) } span { (view.bedrooms) } }
                    }
                    @if let Some(pool) = &view.pool_size {
                        div { strong { (t(lang, "Piscine", "Pool")) } span { (pool) } }
                    }
                }

                @if let Some(description) = &view.description {
                    (card(&copy("description_title"), html! {
                        @for paragraph in lines(description) {
                            p { (paragraph) }
                        }
                    }))
                }

                @if view.images.len() > 1 {
                    section class="gallery" {
                        @for image in view.images.iter().skip(1) {
                            img src=(format!("/static/uploads/{image}")) loading="lazy" alt="";
                        }
                    }
                }

                (bullet_section(t(lang, "Caractéristiques", "Features"), view.features.as_ref()))
                (bullet_section(t(lang, "Équipements", "Equipment"), view.equipment.as_ref()))
                (bullet_section(t(lang, "Activité commerciale", "Business information"), view.business_info.as_ref()))
                (bullet_section(t(lang, "Atouts investissement", "Investment benefits"), view.investment_benefits.as_ref()))
                (bullet_section(t(lang, "Documents disponibles", "Available documents"), view.documents.as_ref()))

                section class="why" {
                    h2 { (copy("why_choose_title")) }
                    div class="why-grid" {
                        @for n in 1..=4 {
                            div class="why-card" {
                                h3 { (copy(&format!("why_card{n}_title"))) }
                                p { (copy(&format!("why_card{n}_desc"))) }
                            }
                        }
                    }
                }

                section id="contact" class="contact" {
                    h2 { (copy("contact_title")) }
                    p { (copy("contact_subtitle")) }
                    ul {
                        @if let Some(phone) = &view.contact_phone {
                            li { a href=(format!("tel:{phone}")) { (phone) } }
                        }
                        @if let Some(email) = &view.contact_email {
                            li { a href=(format!("mailto:{email}")) { (email) } }
                        }
                        @if let Some(website) = &view.contact_website {
                            li { a href=(website) rel="noopener" { (website) } }
                        }
                    }
                    @if let Some(link) = view.contact_phone.as_deref().and_then(whatsapp_link) {
                        a href=(link) class="btn whatsapp" target="_blank" rel="noopener" {
                            (copy("whatsapp_button"))
                        }
                    }
                    @if !view.reference.is_empty() {
                        p class="muted" { (t(lang, "Réf. ", "Ref. ")) (view.reference) }
                    }
                }
            }
        },
    )
}
