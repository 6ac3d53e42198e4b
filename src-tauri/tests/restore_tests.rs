use base64::{engine::general_purpose::STANDARD, Engine};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use photo_restorer_tauri::config::MODEL_NAME;
use photo_restorer_tauri::restoration::prompt::{CLOSING_DIRECTIVE, TASK_LIST_HEADER};
use photo_restorer_tauri::restoration::{
    build_restoration_prompt, restore, GeminiClient, RestorationOption, RestorationOptions,
    RestoreRequest,
};
use photo_restorer_tauri::RestoreError;

/// A captured HTTP request: lowercased head and raw body.
struct Captured {
    head: String,
    body: String,
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

async fn read_request(socket: &mut TcpStream) -> Captured {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = find_header_end(&buf) {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let content_length = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                return Captured {
                    head,
                    body: String::from_utf8_lossy(&buf[end + 4..end + 4 + content_length])
                        .to_string(),
                };
            }
        }
    }
    let end = find_header_end(&buf).unwrap_or(buf.len());
    Captured {
        head: String::from_utf8_lossy(&buf[..end]).to_lowercase(),
        body: String::new(),
    }
}

/// Serve exactly one response on a loopback port.
async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let captured = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        captured
    });
    (format!("http://{}", addr), handle)
}

fn jpeg_request(size: usize, options: RestorationOptions) -> RestoreRequest {
    RestoreRequest {
        image_base64: STANDARD.encode(vec![0xABu8; size]),
        mime_type: "image/jpeg".to_string(),
        options,
    }
}

#[tokio::test]
async fn test_successful_restoration_returns_png() {
    let body = r#"{"candidates":[{"content":{"parts":[{"inlineData":{"mimeType":"image/png","data":"iVBORw0KGgo="}}]}}]}"#;
    let (base_url, server) = serve_once("200 OK", body.to_string()).await;

    let client = GeminiClient::new(&base_url, MODEL_NAME, "test-key").unwrap();
    let request = jpeg_request(1024, RestorationOptions::default());
    let response = restore(&client, &request).await.unwrap();

    assert_eq!(response.image_base64, "iVBORw0KGgo=");
    assert_eq!(response.mime_type, "image/png");
    assert!(response.file_name.starts_with("restored-"));
    assert!(response.file_name.ends_with(".png"));

    let captured = server.await.unwrap();
    assert!(captured
        .head
        .starts_with("post /v1beta/models/gemini-2.5-flash-image:generatecontent"));
    assert!(captured.head.contains("x-goog-api-key: test-key"));

    let sent: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    let parts = &sent["contents"][0]["parts"];
    assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
    assert_eq!(parts[0]["inlineData"]["data"], request.image_base64.as_str());
    assert_eq!(
        parts[1]["text"],
        build_restoration_prompt(&RestorationOptions::default()).as_str()
    );
    assert_eq!(
        sent["generationConfig"]["responseModalities"],
        serde_json::json!(["IMAGE"])
    );
}

#[tokio::test]
async fn test_response_without_image_is_failure() {
    let body = r#"{"candidates":[{"content":{"parts":[{"text":"Sorry, I can't help with that."}]}}]}"#;
    let (base_url, server) = serve_once("200 OK", body.to_string()).await;

    let client = GeminiClient::new(&base_url, MODEL_NAME, "test-key").unwrap();
    let mut options = RestorationOptions::default();
    options.toggle(RestorationOption::Upscale);
    options.toggle(RestorationOption::SharpenFace);

    let err = restore(&client, &jpeg_request(2 * 1024 * 1024, options))
        .await
        .unwrap_err();
    assert!(matches!(err, RestoreError::NoImageData));
    assert!(err.to_string().starts_with("No image data received"));

    let captured = server.await.unwrap();
    let sent: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    let prompt = sent["contents"][0]["parts"][1]["text"].as_str().unwrap();
    assert!(prompt.contains("- UPSCALE"));
    assert!(!prompt.contains("- FACE ENHANCEMENT"));
}

#[tokio::test]
async fn test_service_error_surfaces_api_message() {
    let body = r#"{"error":{"code":403,"message":"Permission denied on resource.","status":"PERMISSION_DENIED"}}"#;
    let (base_url, _server) = serve_once("403 Forbidden", body.to_string()).await;

    let client = GeminiClient::new(&base_url, MODEL_NAME, "bad-key").unwrap();
    let err = restore(&client, &jpeg_request(64, RestorationOptions::default()))
        .await
        .unwrap_err();

    match err {
        RestoreError::Service { status, ref message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "Permission denied on resource.");
        }
        other => panic!("expected service error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_response_is_failure() {
    let (base_url, _server) = serve_once("200 OK", "not json".to_string()).await;

    let client = GeminiClient::new(&base_url, MODEL_NAME, "test-key").unwrap();
    let err = restore(&client, &jpeg_request(64, RestorationOptions::default()))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Malformed response"));
}

#[tokio::test]
async fn test_invalid_source_is_rejected_before_network() {
    // Nothing listens on this port; validation must fail first.
    let client = GeminiClient::new("http://127.0.0.1:9", MODEL_NAME, "test-key").unwrap();

    let mut request = jpeg_request(64, RestorationOptions::default());
    request.mime_type = "image/gif".to_string();
    let err = restore(&client, &request).await.unwrap_err();
    assert!(matches!(err, RestoreError::Validation(_)));

    let request = jpeg_request(4 * 1024 * 1024 + 1, RestorationOptions::default());
    let err = restore(&client, &request).await.unwrap_err();
    assert!(err.to_string().contains("too large"));
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = GeminiClient::new(&format!("http://{}", addr), MODEL_NAME, "k").unwrap();
    let err = restore(&client, &jpeg_request(64, RestorationOptions::default()))
        .await
        .unwrap_err();
    assert!(matches!(err, RestoreError::Transport(_)));
}

#[test]
fn test_task_order_independent_of_toggle_history() {
    let mut forward = RestorationOptions::none();
    for option in RestorationOption::ALL {
        forward.toggle(option);
    }

    let mut backward = RestorationOptions::none();
    for option in RestorationOption::ALL.iter().rev() {
        backward.toggle(*option);
    }

    let prompt = build_restoration_prompt(&forward);
    assert_eq!(prompt, build_restoration_prompt(&backward));

    let positions: Vec<usize> = [
        "- COLORIZATION",
        "- DENOISE",
        "- REPAIR",
        "- FACE ENHANCEMENT",
        "- UPSCALE",
    ]
    .iter()
    .map(|tag| prompt.find(tag).unwrap())
    .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_every_subset_keeps_canonical_order() {
    for mask in 0u8..32 {
        let mut options = RestorationOptions::none();
        for (bit, option) in RestorationOption::ALL.iter().enumerate() {
            if mask & (1 << bit) != 0 {
                options.set(*option, true);
            }
        }

        let prompt = build_restoration_prompt(&options);
        let header_at = prompt.find(TASK_LIST_HEADER).unwrap();
        let closing_at = prompt.rfind(CLOSING_DIRECTIVE).unwrap();
        let tasks: Vec<&str> = prompt[header_at..closing_at]
            .lines()
            .filter(|l| l.starts_with("- "))
            .collect();

        assert_eq!(tasks.len(), mask.count_ones() as usize);
        let expected: Vec<RestorationOption> = options.enabled().collect();
        for (line, option) in tasks.iter().zip(expected) {
            assert_eq!(
                *line,
                photo_restorer_tauri::restoration::prompt::task_line(option)
            );
        }
    }
}
