pub fn config_file() -> String {
    "logbook.toml".to_string()
}

pub fn changelogs_dir() -> String {
    "n8nmanager/changelogs".to_string()
}

pub fn template() -> String {
    "templates/changelog.template.html".to_string()
}

pub fn output() -> String {
    "n8nmanager/changelog.html".to_string()
}

pub fn sitemap() -> String {
    "n8nmanager/sitemap.xml".to_string()
}

pub fn index_file_name() -> String {
    "index.json".to_string()
}

pub fn placeholder() -> String {
    "{{CHANGELOGS_CONTENT}}".to_string()
}

pub fn date_format() -> String {
    "%Y年%-m月%-d日".to_string()
}

pub fn changelog_suffix() -> String {
    "changelog.html".to_string()
}

pub fn homepage_suffix() -> String {
    "/n8nmanager".to_string()
}
