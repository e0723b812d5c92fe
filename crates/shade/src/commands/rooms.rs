//! Catalog queries. No gateway credentials are needed here.

use std::collections::BTreeMap;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// `shade rooms`: every room with its direction labels.
pub fn list(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = super::load(global)?;
    let catalog = super::catalog(&cfg)?;

    let mut rooms = BTreeMap::new();
    for room in catalog.rooms() {
        rooms.insert(room.as_str(), catalog.directions(room.as_str())?);
    }
    super::print_json(&rooms)
}

/// `shade register <room>`
pub fn register(room: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = super::load(global)?;
    let directions = super::catalog(&cfg)?.directions(room)?;
    super::print_json(&directions)
}
