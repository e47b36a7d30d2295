//! Terminal tables for movie listings.

use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL};

use crate::movie::MovieRecord;

pub const MOVIE_HEADERS: &[&str] = &["Id", "Title", "Release Date"];
pub const REVIEW_HEADERS: &[&str] = &["Id", "Title", "Release Date", "Review"];

/// A search or watchlist listing.
pub fn movies<'a>(records: impl IntoIterator<Item = &'a MovieRecord>) -> Table {
  build(MOVIE_HEADERS, records)
}

/// A review listing; records without a review get an empty cell.
pub fn reviews<'a>(records: impl IntoIterator<Item = &'a MovieRecord>) -> Table {
  build(REVIEW_HEADERS, records)
}

fn build<'a>(
  headers: &[&str],
  records: impl IntoIterator<Item = &'a MovieRecord>,
) -> Table {
  let mut table = Table::new();
  table
    .load_preset(UTF8_FULL)
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_header(headers.iter().map(|h| Cell::new(h)));

  for record in records {
    let mut cells = record.row();
    cells.resize(headers.len(), String::new());
    table.add_row(cells);
  }
  table
}
