use crate::domain::Lang;
use maud::{html, Markup, DOCTYPE};

/// Public layout with the FR/EN switcher.
pub fn site_layout(title: &str, lang: Lang, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang.code()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href="/static/main.css";
            }
            body class="site" {
                header class="topbar" {
                    a href="/" class="brand" { (title) }
                    nav class="lang-switch" {
                        @for option in [Lang::Fr, Lang::En] {
                            a href=(format!("/set-language/{}", option.code()))
                                class=[(option == lang).then_some("active")]
                            {
                                (option.code().to_uppercase())
                            }
                        }
                    }
                }
                (content)
                footer {
                    p { "© " (title) }
                }
            }
        }
    }
}
