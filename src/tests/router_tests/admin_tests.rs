use crate::ai::AiError;
use crate::db::listing::{load_listing, save_listing};
use crate::domain::ListingRecord;
use crate::router::handle;
use crate::tests::fakes::{FakeTextExtractor, ScriptedBackend};
use crate::tests::utils::{admin_cookie, body_json, body_string, init_test_app, TestApp};
use astra::Body;
use chrono::Utc;
use http::{Method, Request};
use image::{GenericImageView, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::sync::Arc;

fn app_with(backend: Arc<ScriptedBackend>) -> TestApp {
    init_test_app(backend, Box::new(FakeTextExtractor::new("")))
}

fn post(t: &TestApp, uri: &str, content_type: &str, body: impl Into<Vec<u8>>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Cookie", admin_cookie(&t.app))
        .header("Content-Type", content_type)
        .body(Body::from(body.into()))
        .unwrap()
}

fn post_form(t: &TestApp, uri: &str, form: &str) -> Request<Body> {
    post(t, uri, "application/x-www-form-urlencoded", form.as_bytes().to_vec())
}

fn stored(t: &TestApp) -> Option<ListingRecord> {
    t.app.db.with_conn(|conn| load_listing(conn)).unwrap()
}

fn seed(t: &TestApp, record: &ListingRecord) {
    t.app
        .db
        .with_conn(|conn| save_listing(conn, record, Utc::now().naive_utc()))
        .unwrap();
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    RgbImage::from_pixel(width, height, Rgb([120, 90, 60]))
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

#[test]
fn admin_save_creates_active_listing() {
    let t = app_with(ScriptedBackend::replying(&[]));

    let req = post_form(
        &t,
        "/admin/save",
        "title=Villa+Eden&title_en=Eden+Villa&price=2400000&bedrooms=six&features=Piscine%0AHammam",
    );
    let resp = handle(req, &t.app).expect("Handler failed");

    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp)["success"], true);

    let record = stored(&t).expect("listing created");
    assert!(record.is_active);
    assert_eq!(record.title_en, "Eden Villa");
    assert_eq!(record.price, 2_400_000);
    assert_eq!(record.bedrooms, 0);
    assert_eq!(record.features, "Piscine\nHammam");
}

#[test]
fn enhance_returns_original_text_when_ai_fails() {
    let backend = ScriptedBackend::new(vec![Err(AiError::Status {
        status: 502,
        body: "bad gateway".into(),
    })]);
    let t = app_with(backend.clone());

    let req = post(
        &t,
        "/api/enhance",
        "application/json",
        br#"{"text": "Belle villa", "field": "description"}"#.to_vec(),
    );
    let resp = handle(req, &t.app).unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp)["enhanced"], "Belle villa");
    assert_eq!(backend.call_count(), 1);
}

#[test]
fn enhance_passes_field_as_context() {
    let backend = ScriptedBackend::replying(&["Une villa d'exception."]);
    let t = app_with(backend.clone());

    let req = post(
        &t,
        "/api/enhance",
        "application/json",
        br#"{"text": "Belle villa", "field": "Description (FR)"}"#.to_vec(),
    );
    let resp = handle(req, &t.app).unwrap();

    assert_eq!(body_json(resp)["enhanced"], "Une villa d'exception.");
    assert!(backend.prompt(0).contains("Contexte: Description (FR)"));
}

#[test]
fn enhance_rejects_non_json_body() {
    let t = app_with(ScriptedBackend::replying(&[]));

    let resp = handle(post(&t, "/api/enhance", "text/plain", b"hello".to_vec()), &t.app).unwrap();

    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["error"], "No data provided");
}

#[test]
fn website_text_requires_an_existing_listing() {
    let t = app_with(ScriptedBackend::replying(&[]));

    let resp = handle(
        post_form(&t, "/admin/save-website-text", "hero_subtitle_fr=Bienvenue"),
        &t.app,
    )
    .unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(resp)["success"], false);

    seed(&t, &ListingRecord {
        title: "Villa Eden".into(),
        is_active: true,
        ..Default::default()
    });
    let resp = handle(
        post_form(&t, "/admin/save-website-text", "hero_subtitle_fr=Bienvenue&hero_subtitle_en=Welcome"),
        &t.app,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);

    let record = stored(&t).unwrap();
    assert_eq!(record.hero_subtitle_fr, "Bienvenue");
    assert_eq!(record.hero_subtitle_en, "Welcome");
    assert_eq!(record.title, "Villa Eden", "site copy form must not touch listing facts");
}

#[test]
fn edit_website_page_lists_site_copy_fields() {
    let t = app_with(ScriptedBackend::replying(&[]));
    seed(&t, &ListingRecord::default());

    let req = Request::builder()
        .method(Method::GET)
        .uri("/admin/edit-website")
        .header("Cookie", admin_cookie(&t.app))
        .body(Body::empty())
        .unwrap();
    let resp = handle(req, &t.app).unwrap();

    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("name=\"why_card4_desc_en\""));
}

#[test]
fn image_upload_is_optimized_and_appended() {
    let t = app_with(ScriptedBackend::replying(&[]));
    seed(&t, &ListingRecord {
        images: vec!["existing.jpg".into()],
        ..Default::default()
    });

    let mut req = post(&t, "/admin/upload", "image/png", png_bytes(2400, 1200));
    req.headers_mut()
        .insert("x-file-name", "Vue%20piscine.png".parse().unwrap());
    let resp = handle(req, &t.app).unwrap();

    assert_eq!(resp.status(), 200);
    let json = body_json(resp);
    let filename = json["filename"].as_str().unwrap().to_string();
    assert!(filename.ends_with("_Vue_piscine.jpg"), "{filename}");

    let path = t.app.config.upload_dir.join(&filename);
    let img = image::open(&path).unwrap();
    assert_eq!(img.dimensions(), (1920, 960));

    let record = stored(&t).unwrap();
    assert_eq!(record.images, vec!["existing.jpg".to_string(), filename]);
    // Only the optimized file remains.
    assert_eq!(std::fs::read_dir(&t.app.config.upload_dir).unwrap().count(), 1);
}

#[test]
fn image_upload_rejects_other_extensions() {
    let t = app_with(ScriptedBackend::replying(&[]));

    let mut req = post(&t, "/admin/upload", "application/pdf", b"%PDF".to_vec());
    req.headers_mut()
        .insert("x-file-name", "brochure.pdf".parse().unwrap());
    let resp = handle(req, &t.app).unwrap();

    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["error"], "Invalid file type");
}

#[test]
fn delete_image_removes_entry_and_file() {
    let t = app_with(ScriptedBackend::replying(&[]));
    let file = t.app.config.upload_dir.join("salon.jpg");
    std::fs::write(&file, b"jpeg").unwrap();
    seed(&t, &ListingRecord {
        images: vec!["salon.jpg".into(), "jardin.jpg".into()],
        ..Default::default()
    });

    let resp = handle(post_form(&t, "/admin/delete-image/salon.jpg", ""), &t.app).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(!file.exists());
    assert_eq!(stored(&t).unwrap().images, vec!["jardin.jpg"]);

    let resp = handle(post_form(&t, "/admin/delete-image/salon.jpg", ""), &t.app).unwrap();
    assert_eq!(resp.status(), 404);
}

#[test]
fn reset_needs_exact_confirmation() {
    let t = app_with(ScriptedBackend::replying(&[]));
    let file = t.app.config.upload_dir.join("salon.jpg");
    std::fs::write(&file, b"jpeg").unwrap();
    seed(&t, &ListingRecord::default());

    let resp = handle(post_form(&t, "/admin/reset", "confirmation=supprimer"), &t.app).unwrap();
    assert_eq!(resp.status(), 400);
    assert!(stored(&t).is_some());

    let resp = handle(post_form(&t, "/admin/reset", "confirmation=SUPPRIMER"), &t.app).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(stored(&t).is_none());
    assert!(!file.exists());
}

#[test]
fn translate_endpoint_fills_english_and_reports_missing() {
    let backend = ScriptedBackend::replying(&[r#"{"title_en": "Eden Villa"}"#]);
    let t = app_with(backend);
    seed(&t, &ListingRecord {
        title: "Villa Eden".into(),
        description: "Une villa au calme".into(),
        description_en: "Old text".into(),
        ..Default::default()
    });

    let resp = handle(post_form(&t, "/admin/translate", ""), &t.app).unwrap();
    assert_eq!(resp.status(), 200);
    let json = body_json(resp);
    assert_eq!(json["success"], true);
    assert_eq!(json["missing"][0], "description");

    let record = stored(&t).unwrap();
    assert_eq!(record.title_en, "Eden Villa");
    assert_eq!(record.description_en, "Old text");
}

#[test]
fn translate_endpoint_keeps_french_edits_made_during_the_call() {
    let backend = ScriptedBackend::replying(&[r#"{"title_en": "Eden Villa"}"#]);
    let t = app_with(backend.clone());
    seed(&t, &ListingRecord {
        title: "Villa Eden".into(),
        price: 1_000_000,
        ..Default::default()
    });

    let db = t.app.db.clone();
    backend.before_next_reply(move || {
        db.with_conn(|conn| {
            let mut record = load_listing(conn)?.unwrap_or_default();
            record.price = 1_500_000;
            record.description = "Ajoutée pendant la traduction".into();
            save_listing(conn, &record, Utc::now().naive_utc())
        })
        .unwrap();
    });

    let resp = handle(post_form(&t, "/admin/translate", ""), &t.app).unwrap();
    assert_eq!(resp.status(), 200);

    let record = stored(&t).unwrap();
    assert_eq!(record.title_en, "Eden Villa");
    assert_eq!(record.price, 1_500_000);
    assert_eq!(record.description, "Ajoutée pendant la traduction");
}

#[test]
fn translate_endpoint_without_listing_is_404_json() {
    let t = app_with(ScriptedBackend::replying(&[]));

    let resp = handle(post_form(&t, "/admin/translate", ""), &t.app).unwrap();

    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(resp)["success"], false);
}
