//! Successful operations against a mock service: wire fields, names, metrics

use crate::integration::mock_server::{file_field, text_field, MockServerFixture};
use docforge_client::{CompressionLevel, InputFile, MergeType, SizeMetrics, TransferClient};

fn pdf(name: &str) -> InputFile {
    InputFile::new(name.to_string(), &b"%PDF-1.7 test document"[..])
}

#[tokio::test]
async fn convert_pdf_to_docx_returns_named_download() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_binary(
            "/convert",
            &[&file_field("file", "report.pdf"), &text_field("target", "docx")],
            b"DOCX-BYTES",
        )
        .await;

    let client = fixture.client();
    let output = client.convert(pdf("report.pdf"), "docx").await.unwrap();
    let file = output.file().unwrap();

    assert_eq!(file.file_name, "report.docx");
    assert!(file.metrics.is_none());
    assert_eq!(file.handle.size(), 10);
    assert_eq!(
        client.downloads().get(&file.handle).unwrap().as_ref(),
        b"DOCX-BYTES"
    );
    assert!(client.downloads().release(&file.handle));
    assert!(client.downloads().is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn convert_pdf_to_jpg_is_named_zip() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_binary("/convert", &[&text_field("target", "jpg")], b"PK\x03\x04")
        .await;

    let output = fixture
        .client()
        .convert(pdf("slides.pdf"), "jpg")
        .await
        .unwrap();

    assert_eq!(output.file().unwrap().file_name, "slides.zip");
    mock.assert_async().await;
}

#[tokio::test]
async fn convert_with_option_resolves_target() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_binary("/convert", &[&text_field("target", "pdfa")], b"%PDF-A")
        .await;

    let output = fixture
        .client()
        .convert_with_option(pdf("scan.pdf"), "pdf-to-pdfa")
        .await
        .unwrap();

    assert_eq!(output.file().unwrap().file_name, "scan.pdf");
    mock.assert_async().await;
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_not_duplicated() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_binary("/convert", &[], b"ok").await;

    let client = TransferClient::new(format!("{}//", fixture.base_url)).unwrap();
    let result = client.convert(pdf("a.pdf"), "docx").await;

    assert!(result.is_ok(), "unexpected failure: {:?}", result.err());
    mock.assert_async().await;
}

#[tokio::test]
async fn compress_derives_category_and_reports_ratio() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_binary(
            "/compress",
            &[
                &file_field("file", "memo.docx"),
                &text_field("compress_type", "word"),
                &text_field("level", "high"),
            ],
            &[0u8; 250],
        )
        .await;

    let input = InputFile::new("memo.docx", vec![7u8; 1000]);
    let output = fixture
        .client()
        .compress(input, CompressionLevel::High)
        .await
        .unwrap();
    let file = output.file().unwrap();

    assert_eq!(file.file_name, "memo_compressed.docx");
    assert_eq!(
        file.metrics,
        Some(SizeMetrics::Compression {
            original_size: 1000,
            compressed_size: 250,
            compression_ratio: Some(75),
        })
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn compress_growth_gives_negative_ratio() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_binary(
            "/compress",
            &[&text_field("compress_type", "image"), &text_field("level", "medium")],
            &[0u8; 150],
        )
        .await;

    let input = InputFile::new("tiny.png", vec![1u8; 100]);
    let output = fixture
        .client()
        .compress(input, CompressionLevel::default())
        .await
        .unwrap();

    match &output.file().unwrap().metrics {
        Some(SizeMetrics::Compression {
            compression_ratio, ..
        }) => assert_eq!(*compression_ratio, Some(-50)),
        other => panic!("unexpected metrics: {other:?}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn compress_as_overrides_category() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_binary("/compress", &[&text_field("compress_type", "pdf")], b"x")
        .await;

    let result = fixture
        .client()
        .compress_as(
            InputFile::new("deck.pptx", vec![1u8; 10]),
            CompressionLevel::Low,
            "pdf",
        )
        .await;

    assert!(result.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn merge_sends_files_in_order() {
    let fixture = MockServerFixture::new().await;
    let ordered = format!(
        "{}[\\s\\S]*{}",
        file_field("files", "intro.docx"),
        file_field("files", "body.docx")
    );
    let mock = fixture
        .mock_binary(
            "/merge",
            &[&ordered, &text_field("merge_type", "word")],
            b"merged-docx",
        )
        .await;

    let files = vec![
        InputFile::new("intro.docx", vec![1u8; 30]),
        InputFile::new("body.docx", vec![2u8; 70]),
    ];
    let output = fixture
        .client()
        .merge(files, MergeType::Word)
        .await
        .unwrap();
    let file = output.file().unwrap();

    assert_eq!(file.file_name, "merged.docx");
    assert_eq!(
        file.metrics,
        Some(SizeMetrics::Merge {
            original_sizes: vec![30, 70],
            merged_size: 11,
        })
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn merge_type_tag_is_case_insensitive() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_binary("/merge", &[&text_field("merge_type", "word")], b"merged")
        .await;

    let files = vec![
        InputFile::new("a.docx", vec![1u8; 4]),
        InputFile::new("b.docx", vec![2u8; 4]),
    ];
    let output = fixture.client().merge(files, "Word").await.unwrap();

    assert_eq!(output.file().unwrap().file_name, "merged.docx");
    mock.assert_async().await;
}

#[tokio::test]
async fn convert_name_stops_at_first_dot() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_binary("/convert", &[&file_field("file", "report.final.pdf")], b"DOCX")
        .await;

    let output = fixture
        .client()
        .convert(pdf("report.final.pdf"), "docx")
        .await
        .unwrap();

    assert_eq!(output.file().unwrap().file_name, "report.docx");
    mock.assert_async().await;
}

#[tokio::test]
async fn split_returns_zip() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_binary("/split", &[&text_field("ranges", "1-3,5")], b"PK")
        .await;

    let output = fixture
        .client()
        .split(pdf("book.pdf"), "1-3,5")
        .await
        .unwrap();

    assert_eq!(output.file().unwrap().file_name, "split_pages.zip");
    mock.assert_async().await;
}

#[tokio::test]
async fn url_to_pdf_names_file_after_host() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_binary(
            "/convert-url",
            &[
                &text_field("url", "https://www.example.com/pricing"),
                &text_field("target", "pdf"),
            ],
            b"%PDF",
        )
        .await;

    let output = fixture
        .client()
        .url_to_pdf("https://www.example.com/pricing")
        .await
        .unwrap();

    assert_eq!(output.file().unwrap().file_name, "example.com.pdf");
    mock.assert_async().await;
}

#[tokio::test]
async fn concurrent_calls_each_get_a_handle() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_binary("/convert", &[], b"same").await;
    let client = fixture.client();

    let (a, b) = tokio::join!(
        client.convert(pdf("a.pdf"), "docx"),
        client.convert(pdf("b.pdf"), "docx")
    );
    let a = a.unwrap().into_file().unwrap();
    let b = b.unwrap().into_file().unwrap();

    assert_ne!(a.handle, b.handle);
    assert_eq!(client.downloads().len(), 2);
    client.downloads().release(&a.handle);
    assert_eq!(client.downloads().len(), 1);
    assert!(client.downloads().contains(&b.handle));
    drop(mock);
}
