//! Render a handful of sample URLs into `demo_qr_codes/`.
//!
//! Run with: cargo run --example demo

use qr_generator::config::GenerationRequest;
use qr_generator::generate::Generator;
use qr_generator::qr::QrcodeEngine;
use qr_generator::telemetry;
use std::path::Path;
use std::process::ExitCode;

const DEMO_DIR: &str = "demo_qr_codes";

const DEMOS: &[(&str, &str, &str)] = &[
    (
        "https://github.com/kaw393939",
        "github_kaw393939.png",
        "Default GitHub Profile",
    ),
    ("https://www.njit.edu", "njit_website.png", "NJIT Official Website"),
    ("https://hub.docker.com", "dockerhub.png", "Docker Hub"),
    ("https://www.rust-lang.org", "rust_lang.png", "Rust Official Website"),
    ("https://crates.io", "crates_io.png", "crates.io"),
];

fn main() -> ExitCode {
    let _telemetry = telemetry::init(Path::new(telemetry::LOG_DIR), "qr_generator_demo");
    let generator = Generator::new(QrcodeEngine::new());

    println!("QR Code Generator - Demo");
    println!("========================");

    let mut created = 0;
    for (i, (url, filename, description)) in DEMOS.iter().enumerate() {
        println!("\n{}. Creating QR code for: {description}", i + 1);
        println!("   URL: {url}");

        let request = match GenerationRequest::new(*url, DEMO_DIR, Some(filename.to_string())) {
            Ok(request) => request,
            Err(err) => {
                println!("   Failed: {err}");
                continue;
            }
        };
        match generator.generate(&request).into_result() {
            Ok(path) => {
                println!("   Created: {}", path.display());
                created += 1;
            }
            Err(err) => println!("   Failed: {err}"),
        }
    }

    println!("\nDemo completed: {created}/{} QR codes", DEMOS.len());
    print_listing(Path::new(DEMO_DIR));

    if created == DEMOS.len() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_listing(dir: &Path) {
    let Ok(read_dir) = std::fs::read_dir(dir) else {
        return;
    };
    let mut files: Vec<(String, u64)> = read_dir
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "png"))
        .filter_map(|e| {
            let size = e.metadata().ok()?.len();
            Some((e.file_name().to_string_lossy().into_owned(), size))
        })
        .collect();
    files.sort();

    if files.is_empty() {
        return;
    }
    println!("\nGenerated files in {}:", dir.display());
    for (name, size) in files {
        println!("   - {name} ({:.1} KB)", size as f64 / 1024.0);
    }
}
