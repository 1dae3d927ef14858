use crate::ai::AiError;
use crate::db::listing::{load_listing, save_listing};
use crate::domain::ListingRecord;
use crate::router::handle;
use crate::tests::fakes::{FakeTextExtractor, ScriptedBackend};
use crate::tests::utils::{admin_cookie, body_json, init_test_app, TestApp};
use astra::Body;
use chrono::Utc;
use http::{Method, Request};

const BROCHURE: &str = "VILLA EDEN - Palmeraie\nPrix : 2 400 000 €\n6 suites";

fn upload_pdf(t: &TestApp, filename: &str, bytes: &[u8]) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/admin/upload-pdf")
        .header("Cookie", admin_cookie(&t.app))
        .header("Content-Type", "application/pdf")
        .header("X-File-Name", filename)
        .body(Body::from(bytes.to_vec()))
        .unwrap()
}

fn existing_listing() -> ListingRecord {
    ListingRecord {
        title: "Ancien titre".into(),
        title_en: "Old title".into(),
        description: "Ancienne description".into(),
        description_en: "Old description".into(),
        documents: "Titre foncier".into(),
        documents_en: "Title deed".into(),
        images: vec!["a.jpg".into()],
        is_active: true,
        ..Default::default()
    }
}

fn stored(t: &TestApp) -> ListingRecord {
    t.app
        .db
        .with_conn(|conn| load_listing(conn))
        .unwrap()
        .expect("listing")
}

#[test]
fn failed_extraction_leaves_listing_untouched() {
    let backend = ScriptedBackend::new(vec![Err(AiError::Status {
        status: 500,
        body: "upstream exploded".into(),
    })]);
    let t = init_test_app(backend.clone(), Box::new(FakeTextExtractor::new(BROCHURE)));
    let before = existing_listing();
    t.app
        .db
        .with_conn(|conn| save_listing(conn, &before, Utc::now().naive_utc()))
        .unwrap();
    let saved = stored(&t);

    let resp = handle(upload_pdf(&t, "brochure.pdf", b"%PDF-1.4"), &t.app).unwrap();

    assert_eq!(resp.status(), 502);
    assert_eq!(body_json(resp)["success"], false);
    assert_eq!(stored(&t), saved);
    // Fail-closed: no translation after a failed extraction.
    assert_eq!(backend.stages(), vec!["extraction"]);
}

#[test]
fn import_without_api_key_is_service_unavailable() {
    let backend = ScriptedBackend::new(vec![Err(AiError::MissingApiKey)]);
    let t = init_test_app(backend, Box::new(FakeTextExtractor::new(BROCHURE)));

    let resp = handle(upload_pdf(&t, "brochure.pdf", b"%PDF-1.4"), &t.app).unwrap();

    assert_eq!(resp.status(), 503);
    let error = body_json(resp)["error"].as_str().unwrap().to_string();
    assert!(error.contains("OPENROUTER_API_KEY"));
}

#[test]
fn scanned_pdf_without_text_is_a_bad_request() {
    let backend = ScriptedBackend::replying(&[]);
    let t = init_test_app(backend.clone(), Box::new(FakeTextExtractor::new("")));

    let resp = handle(upload_pdf(&t, "scan.pdf", b"%PDF-1.4"), &t.app).unwrap();

    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["error"], "Could not extract text from PDF");
    assert_eq!(backend.call_count(), 0);
}

#[test]
fn non_pdf_upload_is_refused() {
    let backend = ScriptedBackend::replying(&[]);
    let t = init_test_app(backend.clone(), Box::new(FakeTextExtractor::new(BROCHURE)));

    let resp = handle(upload_pdf(&t, "brochure.docx", b"PK"), &t.app).unwrap();

    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["error"], "File must be a PDF");
    assert_eq!(backend.call_count(), 0);
}

#[test]
fn successful_import_updates_listing_and_reports_partial_translation() {
    let backend = ScriptedBackend::replying(&[
        r#"{"title": "Villa Eden", "price": 2400000, "bedrooms": 6, "description": "Six suites dans la Palmeraie"}"#,
        "```json\n{\"title_en\": \"Eden Villa\"}\n```",
    ]);
    let t = init_test_app(backend, Box::new(FakeTextExtractor::new(BROCHURE)));
    t.app
        .db
        .with_conn(|conn| save_listing(conn, &existing_listing(), Utc::now().naive_utc()))
        .unwrap();

    let resp = handle(upload_pdf(&t, "Brochure%20Eden.PDF", b"%PDF-1.4"), &t.app).unwrap();

    assert_eq!(resp.status(), 200);
    let json = body_json(resp);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["title_en"], "Eden Villa");
    assert_eq!(json["missing_translations"][0], "description");

    let record = stored(&t);
    assert_eq!(record.title, "Villa Eden");
    assert_eq!(record.title_en, "Eden Villa");
    assert_eq!(record.price, 2_400_000);
    assert_eq!(record.bedrooms, 6);
    assert_eq!(record.description, "Six suites dans la Palmeraie");
    // English written for the previous brochure is not paired with the new French.
    assert_eq!(record.description_en, "");
    assert_eq!(record.documents, "");
    assert_eq!(record.documents_en, "");
    assert_eq!(record.images, vec!["a.jpg"]);
}
