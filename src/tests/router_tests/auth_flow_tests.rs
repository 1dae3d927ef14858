use crate::router::handle;
use crate::tests::fakes::{FakeTextExtractor, ScriptedBackend};
use crate::tests::utils::{body_string, init_test_app, TEST_PASSWORD};
use astra::Body;
use http::{Method, Request};

fn login_request(password: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/login")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(format!("password={password}").into_bytes()))
        .unwrap()
}

#[test]
fn login_page_loads_successfully() {
    let t = init_test_app(ScriptedBackend::replying(&[]), Box::new(FakeTextExtractor::new("")));

    let req = Request::builder()
        .method(Method::GET)
        .uri("/login")
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &t.app).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Connexion"));
    assert!(body.contains("type=\"password\""));
}

#[test]
fn admin_routes_redirect_to_login_without_session() {
    let t = init_test_app(ScriptedBackend::replying(&[]), Box::new(FakeTextExtractor::new("")));

    for (method, uri) in [
        (Method::GET, "/admin"),
        (Method::GET, "/admin/edit-website"),
        (Method::POST, "/admin/upload-pdf"),
        (Method::POST, "/api/enhance"),
    ] {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("Cookie", "session=not-a-real-token")
            .body(Body::empty())
            .unwrap();

        let resp = handle(req, &t.app).expect("Handler failed");
        assert_eq!(resp.status(), 302, "{uri}");
        assert_eq!(resp.headers().get("Location").unwrap(), "/login");
    }
}

#[test]
fn wrong_password_is_refused() {
    let t = init_test_app(ScriptedBackend::replying(&[]), Box::new(FakeTextExtractor::new("")));

    let resp = handle(login_request("guess"), &t.app).unwrap();

    assert_eq!(resp.status(), 401);
    assert!(resp.headers().get("Set-Cookie").is_none());
    assert!(body_string(resp).contains("Mot de passe incorrect"));
}

#[test]
fn login_cookie_unlocks_admin_until_logout() {
    let t = init_test_app(ScriptedBackend::replying(&[]), Box::new(FakeTextExtractor::new("")));

    let resp = handle(login_request(TEST_PASSWORD), &t.app).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(resp.headers().get("Location").unwrap(), "/admin");

    let set_cookie = resp.headers().get("Set-Cookie").unwrap().to_str().unwrap();
    assert!(set_cookie.contains("HttpOnly"));
    let cookie = set_cookie.split(';').next().unwrap().to_string();

    let admin = |cookie: &str| {
        Request::builder()
            .method(Method::GET)
            .uri("/admin")
            .header("Cookie", cookie)
            .body(Body::empty())
            .unwrap()
    };

    let resp = handle(admin(&cookie), &t.app).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Fiche villa"));

    let logout = Request::builder()
        .method(Method::GET)
        .uri("/logout")
        .header("Cookie", cookie.as_str())
        .body(Body::empty())
        .unwrap();
    let resp = handle(logout, &t.app).unwrap();
    assert_eq!(resp.headers().get("Location").unwrap(), "/login");

    let resp = handle(admin(&cookie), &t.app).unwrap();
    assert_eq!(resp.status(), 302, "revoked session must not open /admin");
}
