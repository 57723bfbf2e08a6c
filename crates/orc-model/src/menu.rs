use serde::{Deserialize, Serialize};

/// Single navigation entry on the console home page.
///
/// All fields are plain UTF-8 strings with no validation applied; the
/// rendering layer escapes them before they reach a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    /// Display name shown as the link text.
    name: String,
    /// Short description shown next to the link.
    description: String,
    /// Link target, absolute or console-relative.
    url: String,
    /// Icon path rendered alongside the entry.
    icon: String,
}

impl MenuEntry {
    /// Create a new menu entry.
    pub fn new<N, D, U, I>(name: N, description: D, url: U, icon: I) -> Self
    where
        N: Into<String>,
        D: Into<String>,
        U: Into<String>,
        I: Into<String>,
    {
        Self {
            name: name.into(),
            description: description.into(),
            url: url.into(),
            icon: icon.into(),
        }
    }

    /// Get the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the link target.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the icon path.
    pub fn icon(&self) -> &str {
        &self.icon
    }
}

/// Built-in navigation table used when no custom table is configured.
///
/// Same flat format as accepted by [`parse_menu_table`].
pub const DEFAULT_MENU_TABLE: &str = "\
Email,Anonymous webmail client,/webmail,/icons/mail.png,\
Torrents,Built-in torrent client,/torrents,/icons/magnet.png,\
Web Server,Local site hosted by this router,http://127.0.0.1:7658/,/icons/server.png,\
Address Book,Hostname subscriptions and local names,/dns,/icons/book.png";

/// Parse a flat comma-separated navigation table.
///
/// Fields come in groups of four: name, description, url, icon. Each field
/// is trimmed. A trailing group with fewer than four fields is dropped, and
/// groups with an empty name are skipped; everything else is kept in table
/// order.
pub fn parse_menu_table(raw: &str) -> Vec<MenuEntry> {
    let fields: Vec<&str> = raw.split(',').map(str::trim).collect();

    let mut entries = Vec::with_capacity(fields.len() / 4);
    for group in fields.chunks_exact(4) {
        if group[0].is_empty() {
            continue;
        }
        entries.push(MenuEntry::new(group[0], group[1], group[2], group[3]));
    }
    entries
}

/// Order entries by display name, case-insensitively.
///
/// The sort is stable, so entries whose names differ only in case keep
/// their table order.
pub fn sort_menu(entries: &mut [MenuEntry]) {
    entries.sort_by_key(|e| e.name().to_ascii_lowercase());
}

/// The built-in table, parsed and sorted.
pub fn default_menu() -> Vec<MenuEntry> {
    let mut entries = parse_menu_table(DEFAULT_MENU_TABLE);
    sort_menu(&mut entries);
    entries
}
