//! Lookup page scraping
//!
//! Every assumption about the lookup site's markup lives here. The rest of
//! the pipeline only sees [`ParsedPage`].

use crate::error::ModgetError;
use modget_types::FileRecord;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

const MOD_LINK_SELECTOR: &str = "a.text-white";
const TABLE_SELECTOR: &str = "table.table";
const CAPTION_SELECTOR: &str = "caption";
const BODY_ROW_SELECTOR: &str = "tbody tr";
const INSTALL_LINK_SELECTOR: &str = "div.cf-install-button a";

/// Caption text identifying the table that lists the newest release
pub const LATEST_VERSION_CAPTION: &str = "Latest version information";

/// Cell holding the release filename
const FILENAME_CELL: usize = 0;
/// Cell holding the install button
const INSTALL_CELL: usize = 3;

/// What the pipeline needs from a lookup page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    /// Last path segment of the mod link, used for logging
    pub mod_name: String,
    pub mod_link: String,
    /// Release filename from the latest version row, trimmed
    pub file_name: String,
    /// Raw file ID from the install link, `None` when there is no link
    pub file_id: Option<String>,
}

impl ParsedPage {
    /// The file record, if the page carried an install link
    pub fn file_record(&self) -> Option<FileRecord> {
        self.file_id.as_ref().map(|id| FileRecord {
            display_name: self.file_name.clone(),
            raw_file_id: id.clone(),
        })
    }
}

fn selector(css: &str) -> Result<Selector, ModgetError> {
    Selector::parse(css).map_err(|e| ModgetError::Selector(format!("{}: {:?}", css, e)))
}

/// Parse a lookup page
pub fn parse_lookup_page(html: &str) -> Result<ParsedPage, ModgetError> {
    let document = Html::parse_document(html);

    let mod_link = document
        .select(&selector(MOD_LINK_SELECTOR)?)
        .next()
        .and_then(|a| a.value().attr("href"))
        .ok_or(ModgetError::MissingModLink)?
        .to_string();
    let mod_name = mod_name_from_link(&mod_link);
    debug!("Mod link: {}", mod_link);

    let table = find_latest_version_table(&document)?;

    let row = table
        .select(&selector(BODY_ROW_SELECTOR)?)
        .next()
        .ok_or(ModgetError::MissingRow)?;

    let cells: Vec<ElementRef> = row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "td")
        .collect();
    if cells.len() <= INSTALL_CELL {
        return Err(ModgetError::MissingCells { found: cells.len() });
    }

    let file_name = cells[FILENAME_CELL]
        .text()
        .collect::<String>()
        .trim()
        .to_string();
    debug!("Release file name: {}", file_name);

    let file_id = cells[INSTALL_CELL]
        .select(&selector(INSTALL_LINK_SELECTOR)?)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(file_id_from_href);

    Ok(ParsedPage {
        mod_name,
        mod_link,
        file_name,
        file_id,
    })
}

fn find_latest_version_table(document: &Html) -> Result<ElementRef<'_>, ModgetError> {
    let caption = selector(CAPTION_SELECTOR)?;

    document
        .select(&selector(TABLE_SELECTOR)?)
        .find(|table| {
            table
                .select(&caption)
                .next()
                .map(|c| c.text().collect::<String>().contains(LATEST_VERSION_CAPTION))
                .unwrap_or(false)
        })
        .ok_or(ModgetError::MissingTable)
}

/// `https://site/hytale/mods/overstacked` -> `overstacked`
fn mod_name_from_link(link: &str) -> String {
    link.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(link)
        .to_string()
}

/// Everything after the last `=` of the install link
fn file_id_from_href(href: &str) -> String {
    href.rsplit('=').next().unwrap_or(href).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(install_cell: &str) -> String {
        format!(
            r#"<html><body>
            <a class="text-white fw-bold" href="https://www.curseforge.com/hytale/mods/overstacked">Overstacked</a>
            <table class="table table-sm">
              <caption>Other files</caption>
              <tbody><tr><td>old.jar</td><td></td><td></td><td></td></tr></tbody>
            </table>
            <table class="table">
              <caption>Latest version information</caption>
              <thead><tr><th>File</th><th>Type</th><th>Date</th><th>Install</th></tr></thead>
              <tbody>
                <tr>
                  <td>
                    Overstacked-2026.1.12-30731.jar
                  </td>
                  <td>Release</td>
                  <td>2026-01-12</td>
                  <td>{}</td>
                </tr>
                <tr><td>second.jar</td><td></td><td></td><td></td></tr>
              </tbody>
            </table>
            </body></html>"#,
            install_cell
        )
    }

    const INSTALL: &str = r#"<div class="cf-install-button"><a href="curseforge://install?addonId=1&amp;fileId=7449795">Install</a></div>"#;

    #[test]
    fn test_parse_full_page() {
        let parsed = parse_lookup_page(&page(INSTALL)).unwrap();
        assert_eq!(parsed.mod_name, "overstacked");
        assert_eq!(
            parsed.mod_link,
            "https://www.curseforge.com/hytale/mods/overstacked"
        );
        assert_eq!(parsed.file_name, "Overstacked-2026.1.12-30731.jar");
        assert_eq!(parsed.file_id.as_deref(), Some("7449795"));

        let record = parsed.file_record().unwrap();
        assert_eq!(record.display_name, "Overstacked-2026.1.12-30731.jar");
        assert_eq!(record.raw_file_id, "7449795");
    }

    #[test]
    fn test_missing_install_button_is_not_an_error() {
        let parsed = parse_lookup_page(&page("<span>n/a</span>")).unwrap();
        assert_eq!(parsed.file_id, None);
        assert!(parsed.file_record().is_none());
    }

    #[test]
    fn test_install_anchor_without_href() {
        let parsed =
            parse_lookup_page(&page(r#"<div class="cf-install-button"><a>Install</a></div>"#))
                .unwrap();
        assert_eq!(parsed.file_id, None);
    }

    #[test]
    fn test_missing_table() {
        let html = r#"<a class="text-white" href="/mods/x">X</a>
            <table class="table"><caption>Other files</caption><tbody><tr><td>a</td></tr></tbody></table>"#;
        assert!(matches!(
            parse_lookup_page(html),
            Err(ModgetError::MissingTable)
        ));
    }

    #[test]
    fn test_missing_mod_link() {
        let html = r#"<a class="text-muted" href="/mods/x">X</a>"#;
        assert!(matches!(
            parse_lookup_page(html),
            Err(ModgetError::MissingModLink)
        ));
    }

    #[test]
    fn test_missing_row() {
        let html = r#"<a class="text-white" href="/mods/x">X</a>
            <table class="table"><caption>Latest version information</caption><tbody></tbody></table>"#;
        assert!(matches!(parse_lookup_page(html), Err(ModgetError::MissingRow)));
    }

    #[test]
    fn test_too_few_cells() {
        let html = r#"<a class="text-white" href="/mods/x">X</a>
            <table class="table"><caption>Latest version information</caption>
            <tbody><tr><td>a.jar</td><td>Release</td></tr></tbody></table>"#;
        assert!(matches!(
            parse_lookup_page(html),
            Err(ModgetError::MissingCells { found: 2 })
        ));
    }

    #[test]
    fn test_helpers() {
        assert_eq!(mod_name_from_link("/hytale/mods/foo/"), "foo");
        assert_eq!(mod_name_from_link("foo"), "foo");
        assert_eq!(file_id_from_href("x?a=1&fileId=123"), "123");
        assert_eq!(file_id_from_href("123"), "123");
    }
}
