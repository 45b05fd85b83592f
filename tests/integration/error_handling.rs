//! Failed operations: validation, service errors, transport errors, parse errors

use crate::integration::mock_server::MockServerFixture;
use docforge_client::{FailureKind, InputFile, TransferClient};

fn pdf() -> InputFile {
    InputFile::new("report.pdf", &b"%PDF"[..])
}

#[tokio::test]
async fn json_detail_becomes_message() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_error("/convert", 400, "application/json", r#"{"detail":"bad file"}"#)
        .await;

    let failure = fixture.client().convert(pdf(), "docx").await.unwrap_err();

    assert_eq!(failure.message, "bad file");
    assert_eq!(failure.kind, FailureKind::Service { status: 400 });
}

#[tokio::test]
async fn json_message_used_when_detail_missing() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_error(
            "/compress",
            422,
            "application/json; charset=utf-8",
            r#"{"message":"unsupported level"}"#,
        )
        .await;

    let failure = fixture
        .client()
        .compress(pdf(), Default::default())
        .await
        .unwrap_err();

    assert_eq!(failure.message, "unsupported level");
}

#[tokio::test]
async fn plain_text_body_becomes_message() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_error("/convert", 500, "text/plain", "oops").await;

    let failure = fixture.client().convert(pdf(), "docx").await.unwrap_err();

    assert_eq!(failure.message, "oops");
    assert_eq!(failure.status(), Some(500));
}

#[tokio::test]
async fn malformed_json_falls_back_to_raw_text() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_error("/split", 502, "application/json", "Bad Gateway")
        .await;

    let failure = fixture.client().split(pdf(), "1").await.unwrap_err();

    assert_eq!(failure.message, "Bad Gateway");
}

#[tokio::test]
async fn empty_body_uses_operation_default() {
    let fixture = MockServerFixture::new().await;
    let _convert = fixture.mock_error("/convert", 500, "text/plain", "").await;
    let _merge = fixture.mock_error("/merge", 503, "application/json", "").await;
    let client = fixture.client();

    let failure = client.convert(pdf(), "docx").await.unwrap_err();
    assert_eq!(failure.message, "Conversion failed. Please try again.");

    let failure = client.merge(vec![pdf(), pdf()], "pdf").await.unwrap_err();
    assert_eq!(failure.message, "File merge failed. Please try again.");
}

#[tokio::test]
async fn merge_with_one_file_never_reaches_server() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_unreachable("/merge").await;

    let failure = fixture
        .client()
        .merge(vec![pdf()], "pdf")
        .await
        .unwrap_err();

    assert!(failure.is_validation());
    assert_eq!(failure.message, "At least 2 files required for merging");
    mock.assert_async().await;
}

#[tokio::test]
async fn invalid_inputs_never_reach_server() {
    let fixture = MockServerFixture::new().await;
    let convert = fixture.mock_unreachable("/convert").await;
    let url = fixture.mock_unreachable("/convert-url").await;
    let client = fixture.client();

    let failure = client
        .convert_with_option(InputFile::new("notes.docx", &b"x"[..]), "pdf-to-jpg")
        .await
        .unwrap_err();
    assert_eq!(failure.message, "Invalid conversion type selected");

    let failure = client.url_to_pdf("not a url").await.unwrap_err();
    assert!(failure.is_validation());

    convert.assert_async().await;
    url.assert_async().await;
}

#[tokio::test]
async fn connection_failure_is_a_network_error() {
    // Nothing listens on port 1.
    let client = TransferClient::new("http://127.0.0.1:1").unwrap();

    let failure = client.convert(pdf(), "docx").await.unwrap_err();

    assert_eq!(failure.kind, FailureKind::Transport);
    assert!(
        failure.message.starts_with("Network error: "),
        "got {}",
        failure.message
    );
}

#[tokio::test]
async fn unparseable_report_uses_default_message() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json("POST", "/convert/pdf-to-notion", 200, "<html>not json</html>")
        .await;

    let failure = fixture.client().pdf_to_notion(pdf()).await.unwrap_err();

    assert_eq!(failure.kind, FailureKind::Parse);
    assert_eq!(failure.message, "Notion conversion failed. Please try again.");
}
