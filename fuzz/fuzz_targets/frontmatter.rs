#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Neither the frontmatter scanner nor version parsing may panic
    let (fm, _body) = logbook::changelog::parse_frontmatter(data);
    if let Some(version) = fm.get("version") {
        let _ = logbook::changelog::Version::parse(version);
    }
    let _ = logbook::changelog::Version::parse(data);
});
