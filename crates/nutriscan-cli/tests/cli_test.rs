//! End-to-end runs of the nutriscan binary

use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::Utc;
use nutriscan_domain::service::to_sao_paulo;
use tempfile::{tempdir, TempDir};

/// Binary isolated from the user's config, .env and API key
fn nutriscan(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_nutriscan"));
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env_remove("GEMINI_API_KEY")
        .env_remove("RUST_LOG");
    for var in ["HTTP_PROXY", "http_proxy", "HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"] {
        cmd.env_remove(var);
    }
    cmd
}

fn run(cmd: &mut Command) -> (i32, String, String) {
    let Output { status, stdout, stderr } = cmd.output().expect("run nutriscan");
    (
        status.code().unwrap_or(-1),
        String::from_utf8_lossy(&stdout).to_string(),
        String::from_utf8_lossy(&stderr).to_string(),
    )
}

fn write_photo(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    image::RgbImage::new(4, 4).save(&path).unwrap();
    path
}

fn write_config(home: &TempDir, json: &str) {
    let dir = home.path().join("config").join("nutriscan");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.json"), json).unwrap();
}

/// Answer a single request with a 200 JSON body
fn serve_once(body: String) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        stream
            .set_read_timeout(Some(Duration::from_millis(500)))
            .unwrap();
        drain_request(&mut stream);
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().ok();
    });
    (base, handle)
}

fn drain_request(stream: &mut std::net::TcpStream) {
    let mut data = Vec::new();
    let mut buf = [0u8; 8192];
    while let Ok(n) = stream.read(&mut buf) {
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
        let text = String::from_utf8_lossy(&data).to_ascii_lowercase();
        if let Some(end) = text.find("\r\n\r\n") {
            let length = text[..end]
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if data.len() >= end + 4 + length {
                break;
            }
        }
    }
}

#[test]
fn test_help_lists_commands() {
    let home = tempdir().unwrap();
    let (code, stdout, _) = run(nutriscan(home.path()).arg("--help"));
    assert_eq!(code, 0);
    assert!(stdout.contains("label"));
    assert!(stdout.contains("fleet"));
    assert!(stdout.contains("config"));
}

#[test]
fn test_missing_api_key_is_an_error() {
    let home = tempdir().unwrap();
    let photo = write_photo(home.path(), "rotulo.png");
    let (code, _, stderr) = run(nutriscan(home.path()).arg("label").arg(&photo));
    assert_eq!(code, 1);
    assert!(stderr.contains("Error:"), "{}", stderr);
    assert!(stderr.contains("GEMINI_API_KEY"), "{}", stderr);
}

#[test]
fn test_label_without_photo_is_a_warning() {
    let home = tempdir().unwrap();
    let (code, _, stderr) = run(nutriscan(home.path())
        .env("GEMINI_API_KEY", "test-key")
        .arg("label"));
    assert_eq!(code, 2);
    assert!(stderr.contains("Warning: Por favor, envie a foto do rótulo primeiro."), "{}", stderr);
}

#[test]
fn test_fleet_missing_photos_is_a_warning() {
    let home = tempdir().unwrap();
    let prefix = write_photo(home.path(), "prefixo.png");
    let (code, _, stderr) = run(nutriscan(home.path())
        .env("GEMINI_API_KEY", "test-key")
        .args(["fleet", "--prefix-photo"])
        .arg(&prefix));
    assert_eq!(code, 2);
    assert!(stderr.contains("Warning: Por favor, envie as 3 fotos"), "{}", stderr);
    assert!(stderr.contains("Odômetro"));
    assert!(!home.path().join("registro_.csv").exists());
}

#[test]
fn test_config_set_and_show() {
    let home = tempdir().unwrap();
    let (code, stdout, _) = run(nutriscan(home.path()).args(["config", "--set-price", "99.9"]));
    assert_eq!(code, 0);
    assert!(stdout.contains("Configuration updated"));

    let (code, stdout, _) = run(nutriscan(home.path()).args(["config", "--show"]));
    assert_eq!(code, 0);
    assert!(stdout.contains("R$ 99.90"), "{}", stdout);
    assert!(home.path().join("config/nutriscan/config.json").exists());
}

#[test]
fn test_fleet_against_stub_model_writes_csv() {
    let answer = r#"{"prefixo": "2031", "odometro_km": 154320, "litros": 38.5, "numero_bomba": "07"}"#;
    let body = serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": answer }] } }]
    })
    .to_string();
    let (base, server) = serve_once(body);

    let home = tempdir().unwrap();
    write_config(&home, &format!(r#"{{"api_base_url": "{}", "timeout_secs": 5}}"#, base));
    let out_dir = home.path().join("out");

    // Host zone far from São Paulo; the stamp must ignore it
    let before = to_sao_paulo(Utc::now()).format("%d/%m/%Y").to_string();
    let (code, stdout, stderr) = run(nutriscan(home.path())
        .env("GEMINI_API_KEY", "test-key")
        .env("TZ", "Asia/Tokyo")
        .args(["fleet", "-f", "json", "--prefix-photo"])
        .arg(write_photo(home.path(), "prefixo.png"))
        .arg("--odometer-photo")
        .arg(write_photo(home.path(), "odometro.png"))
        .arg("--pump-photo")
        .arg(write_photo(home.path(), "bomba.png"))
        .arg("--out-dir")
        .arg(&out_dir));
    let after = to_sao_paulo(Utc::now()).format("%d/%m/%Y").to_string();
    server.join().unwrap();

    assert_eq!(code, 0, "{}", stderr);
    let reading: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(reading["prefixo"], "2031");
    assert_eq!(reading["odometro_km"], 154320);
    assert_eq!(reading["numero_bomba"], "07");
    let date = reading["data"].as_str().unwrap();
    assert!(date == before || date == after, "stamped {} outside São Paulo date", date);

    let csv = std::fs::read_to_string(out_dir.join("registro_2031.csv")).unwrap();
    assert!(csv.starts_with("prefixo,odometro_km,litros,numero_bomba,data,hora\n2031,154320,38.5,07,"));
}
