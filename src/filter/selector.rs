use crate::error::{AppError, Result};
use crate::types::Event;

/// Result of walking one feed page against the watermark.
#[derive(Debug)]
pub struct Selection<'a> {
    /// Events newer than the starting watermark, oldest first.
    pub fresh: Vec<(u64, &'a Event)>,
    /// Events at or below the watermark.
    pub skipped: usize,
    /// max(starting watermark, every id in the page).
    pub watermark: u64,
}

pub fn parse_event_id(event: &Event) -> Result<u64> {
    event
        .id
        .trim()
        .parse::<u64>()
        .map_err(|_| AppError::Malformed(format!("event id `{}` is not a non-negative integer", event.id)))
}

/// Select the events of a newest-first page that have not been processed yet.
///
/// The page is walked from its last element to its first so that several new
/// sales come out in chronological order. An event is new only when its id is
/// strictly greater than the running watermark, which is advanced on every
/// pick; a page that is not perfectly ordered therefore never yields an id
/// twice or an id lower than one already picked.
///
/// Every id is parsed before anything is selected: one bad id rejects the
/// whole page.
pub fn select_new(page: &[Event], watermark: u64) -> Result<Selection<'_>> {
    let ids = page.iter().map(parse_event_id).collect::<Result<Vec<u64>>>()?;

    let mut current = watermark;
    let mut fresh = Vec::new();
    let mut skipped = 0usize;

    for (id, event) in ids.into_iter().zip(page).rev() {
        if id <= current {
            skipped += 1;
            continue;
        }
        current = id;
        fresh.push((id, event));
    }

    Ok(Selection { fresh, skipped, watermark: current })
}
