use maud::{html, Markup, DOCTYPE};

/// Admin-side layout. `is_admin` toggles the panel navigation.
pub fn desktop_layout(title: &str, is_admin: bool, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="fr" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="robots" content="noindex";
                title { (title) " · Administration" }
                link rel="stylesheet" href="/static/main.css";
                @if is_admin {
                    script src="/static/admin.js" defer {};
                }
            }
            body class="admin" {
                header class="topbar" {
                    svg
                        xmlns="http://www.w3.org/2000/svg"
                        width="24"
                        height="24"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="#b08d57"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                    {
                        path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                        path d="M5 12l-2 0l9 -9l9 9l-2 0" {}
                        path d="M5 12v7a2 2 0 0 0 2 2h10a2 2 0 0 0 2 -2v-7" {}
                        path d="M9 21v-6a2 2 0 0 1 2 -2h2a2 2 0 0 1 2 2v6" {}
                    }
                    h3 { "Administration de la villa" }
                    nav {
                        ul {
                            li { a href="/" target="_blank" { "Voir le site" } }
                            @if is_admin {
                                li { a href="/admin" { "Fiche villa" } }
                                li { a href="/admin/edit-website" { "Textes du site" } }
                            }
                        }
                    }
                    @if is_admin {
                        a href="/logout" class="logout" { "Déconnexion" }
                    }
                }
                div id="toast" class="toast" hidden {}
                (content)
            }
        }
    }
}
