//! Build script for flood-data-visualiser.
//!
//! Copies the flood inventory CSV and the state GeoJSON to OUT_DIR so they
//! can be embedded via `include_str!`, and gzip-compresses the (much larger)
//! district GeoJSON for `include_bytes!`. Missing fixtures are replaced by
//! empty placeholders; the app then reports a startup error.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(bytes)
        .unwrap_or_else(|e| panic!("Failed to compress district geometries: {}", e));
    encoder
        .finish()
        .unwrap_or_else(|e| panic!("Failed to finish district geometry archive: {}", e))
}

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    let files = vec![
        ("../fixtures/IndiaFloodInventory.csv", "IndiaFloodInventory.csv", false),
        ("../fixtures/india_states.geojson", "india_states.geojson", false),
        ("../fixtures/india_districts.geojson", "india_districts.geojson.gz", true),
    ];

    for (src_path, dest_name, compress) in &files {
        let src = Path::new(src_path);
        let dest = Path::new(&out_dir).join(dest_name);
        let contents = if src.exists() {
            fs::read(src).unwrap_or_else(|e| panic!("Failed to read {}: {}", src_path, e))
        } else {
            println!(
                "cargo:warning=Fixture file {} not found, using empty placeholder",
                src_path
            );
            Vec::new()
        };
        let contents = if *compress { gzip(&contents) } else { contents };
        fs::write(&dest, contents).unwrap_or_else(|e| {
            panic!("Failed to write {}: {}", dest.display(), e);
        });
        println!("cargo:rerun-if-changed={}", src_path);
    }

    println!("cargo:rerun-if-changed=build.rs");
}
