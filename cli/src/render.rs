//! Plain-text rendering of a sidebar snapshot.

use relatedbar::ItemKind;
use relatedbar::state::sidebar::{SidebarSnapshot, SnapshotEntry};

pub const LOADING: &str = "Loading related items...";
pub const EMPTY: &str = "No related items";

/// Rendered rows plus the rows worth scrolling to.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Rendered {
    pub lines: Vec<String>,
    pub active_row: Option<usize>,
    pub anchor_row: Option<usize>,
}

impl Rendered {
    /// Row to bring into view: the active entry, else the anchor.
    pub fn focus_row(&self) -> Option<usize> {
        self.active_row.or(self.anchor_row)
    }
}

pub fn render(snapshot: &SidebarSnapshot) -> Rendered {
    let mut out = Rendered::default();
    if !snapshot.ready {
        out.lines.push(LOADING.to_owned());
        return out;
    }
    if snapshot.empty {
        out.lines.push(EMPTY.to_owned());
        return out;
    }

    let sections = [(ItemKind::Dashboard, &snapshot.dashboards), (ItemKind::Query, &snapshot.queries)];
    for (kind, entries) in sections {
        let Some(entries) = entries else {
            continue;
        };
        out.lines.push(kind.label().to_owned());
        for entry in entries {
            let row = out.lines.len();
            if entry.active {
                out.active_row.get_or_insert(row);
            }
            if entry.anchor {
                out.anchor_row.get_or_insert(row);
            }
            out.lines.push(entry_line(entry));
        }
    }
    out
}

fn entry_line(entry: &SnapshotEntry) -> String {
    let marker = if entry.active {
        '>'
    } else if entry.anchor {
        '*'
    } else {
        ' '
    };
    format!("{marker} {}  {}", entry.name, entry.url)
}

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;
