use crate::db::listing::save_listing;
use crate::domain::ListingRecord;
use crate::router::handle;
use crate::tests::fakes::{FakeTextExtractor, ScriptedBackend};
use crate::tests::utils::{body_json, body_string, init_test_app, TestApp};
use astra::Body;
use chrono::Utc;
use http::{Method, Request};

fn app() -> TestApp {
    init_test_app(ScriptedBackend::replying(&[]), Box::new(FakeTextExtractor::new("")))
}

fn get(uri: &str) -> http::request::Builder {
    Request::builder().method(Method::GET).uri(uri)
}

fn seed_listing(t: &TestApp, is_active: bool) {
    let record = ListingRecord {
        title: "Villa des Oliviers".into(),
        title_en: "Olive Tree Villa".into(),
        description: "Une demeure au calme".into(),
        price: 1_250_000,
        hero_subtitle_fr: "Un havre de paix".into(),
        is_active,
        ..Default::default()
    };
    t.app
        .db
        .with_conn(|conn| save_listing(conn, &record, Utc::now().naive_utc()))
        .unwrap();
}

#[test]
fn home_page_loads_without_listing() {
    let t = app();

    let resp = handle(get("/").body(Body::empty()).unwrap(), &t.app).unwrap();

    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Bientôt disponible"));
}

#[test]
fn home_page_follows_requested_language() {
    let t = app();
    seed_listing(&t, true);

    let fr = handle(get("/").body(Body::empty()).unwrap(), &t.app).unwrap();
    let fr = body_string(fr);
    assert!(fr.contains("Villa des Oliviers"));
    assert!(fr.contains("Un havre de paix"));
    assert!(fr.contains("1 250 000 €"));

    let en = handle(
        get("/")
            .header("Cookie", "lang=en")
            .body(Body::empty())
            .unwrap(),
        &t.app,
    )
    .unwrap();
    let en = body_string(en);
    assert!(en.contains("Olive Tree Villa"));
    assert!(en.contains("Discover this exceptional villa in Marrakech"));
    assert!(!en.contains("Une demeure au calme"));
}

#[test]
fn query_language_beats_cookie_and_header() {
    let t = app();
    seed_listing(&t, true);

    let req = get("/api/villa?lang=fr")
        .header("Cookie", "lang=en")
        .header("Accept-Language", "en-US")
        .body(Body::empty())
        .unwrap();
    let json = body_json(handle(req, &t.app).unwrap());
    assert_eq!(json["lang"], "fr");
    assert_eq!(json["title"], "Villa des Oliviers");

    let req = get("/api/villa")
        .header("Accept-Language", "en-US,en;q=0.9")
        .body(Body::empty())
        .unwrap();
    let json = body_json(handle(req, &t.app).unwrap());
    assert_eq!(json["title"], "Olive Tree Villa");
    assert!(json["description"].is_null(), "no French fallback in English");
}

#[test]
fn villa_api_is_404_for_inactive_listing() {
    let t = app();
    seed_listing(&t, false);

    let resp = handle(get("/api/villa").body(Body::empty()).unwrap(), &t.app).unwrap();

    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(resp)["success"], false);
}

#[test]
fn set_language_sets_cookie_and_goes_back() {
    let t = app();

    let req = get("/set-language/en")
        .header("Referer", "http://localhost:3000/?x=1")
        .body(Body::empty())
        .unwrap();
    let resp = handle(req, &t.app).unwrap();

    assert_eq!(resp.status(), 302);
    assert_eq!(resp.headers().get("Location").unwrap(), "/?x=1");
    let cookie = resp.headers().get("Set-Cookie").unwrap().to_str().unwrap();
    assert!(cookie.starts_with("lang=en;"));
}

#[test]
fn set_language_never_redirects_off_site() {
    let t = app();

    for referer in [
        "http://localhost:3000//evil.example/x",
        "http://localhost:3000/\\evil.example/x",
    ] {
        let req = get("/set-language/fr")
            .header("Referer", referer)
            .body(Body::empty())
            .unwrap();
        let resp = handle(req, &t.app).unwrap();

        assert_eq!(resp.status(), 302);
        assert_eq!(resp.headers().get("Location").unwrap(), "/", "{referer}");
    }
}

#[test]
fn static_files_are_served_but_not_outside_root() {
    let t = app();
    std::fs::write(t.app.config.static_dir.join("admin.js"), "console.log(1);").unwrap();

    let resp = handle(get("/static/admin.js").body(Body::empty()).unwrap(), &t.app).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp
        .headers()
        .get("Content-Type")
        .unwrap()
        .to_str()
        .unwrap()
        .contains("javascript"));

    let result = handle(
        get("/static/../test.sqlite3").body(Body::empty()).unwrap(),
        &t.app,
    );
    assert!(matches!(result, Err(crate::errors::ServerError::NotFound)));
}

#[test]
fn unknown_route_is_not_found() {
    let t = app();
    let result = handle(get("/nope").body(Body::empty()).unwrap(), &t.app);
    assert!(matches!(result, Err(crate::errors::ServerError::NotFound)));
}
