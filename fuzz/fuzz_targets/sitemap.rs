#![no_main]
use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &str| {
    // Arbitrary XML must produce an error, never a panic
    let _ = logbook::render::sitemap::patch_lastmod(
        data,
        "changelog.html",
        "2024-01-01",
        Path::new("fuzz.xml"),
    );
});
