use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn login_page(error: Option<&str>) -> Markup {
    desktop_layout(
        "Connexion",
        false,
        html! {
            main class="container narrow" {
                h1 { "Connexion" }
                p class="lead" { "Entrez le mot de passe administrateur." }

                @if let Some(error) = error {
                    p class="alert error" { (error) }
                }

                form method="post" action="/login" class="stack" {
                    label class="field" {
                        span { "Mot de passe" }
                        input type="password" name="password" autocomplete="current-password" required autofocus;
                    }
                    button type="submit" class="btn" { "Se connecter" }
                }
            }
        },
    )
}
