use maud::{html, Markup};

pub fn text_input(name: &str, label: &str, value: &str) -> Markup {
    html! {
        label class="field" {
            span { (label) }
            input type="text" name=(name) id=(name) value=(value);
        }
    }
}

pub fn number_input(name: &str, label: &str, value: i64) -> Markup {
    html! {
        label class="field" {
            span { (label) }
            input type="number" min="0" name=(name) id=(name) value=(value);
        }
    }
}

/// With `enhance`, adds an "improve" button wired to `/api/enhance` by admin.js.
pub fn textarea_field(name: &str, label: &str, value: &str, rows: u8, enhance: bool) -> Markup {
    html! {
        label class="field" {
            span {
                (label)
                @if enhance {
                    button type="button" class="btn-enhance" data-field=(name) data-label=(label) {
                        "✨ Améliorer"
                    }
                }
            }
            textarea name=(name) id=(name) rows=(rows) { (value) }
        }
    }
}
