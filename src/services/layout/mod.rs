//! Event tile layout for month cells and day/week time columns.
//!
//! Pure geometry: callers pass the sizes their toolkit uses and get back
//! counts and offsets to draw with.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::models::event::CalendarEvent;
use crate::utils::date::minutes_since_midnight;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// How many event tiles a month cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellTiles {
    pub visible: usize,
    /// Events collapsed into the "+N more" marker
    pub overflow: usize,
}

/// Fit `event_count` tiles of `tile_height` (plus `spacing` between them) into a cell.
///
/// When not every tile fits, the last row is taken by the overflow marker.
pub fn month_cell_tiles(event_count: usize, cell_height: f32, tile_height: f32, spacing: f32) -> CellTiles {
    let row = tile_height + spacing;
    let rows = if row > 0.0 && cell_height > 0.0 {
        ((cell_height + spacing) / row).floor() as usize
    } else {
        0
    };

    if event_count <= rows {
        return CellTiles {
            visible: event_count,
            overflow: 0,
        };
    }

    let visible = rows.saturating_sub(1);
    CellTiles {
        visible,
        overflow: event_count - visible,
    }
}

/// Same as [`month_cell_tiles`] but capped at a fixed tile count.
pub fn month_cell_tiles_capped(event_count: usize, max_tiles: usize) -> CellTiles {
    if event_count <= max_tiles {
        CellTiles {
            visible: event_count,
            overflow: 0,
        }
    } else {
        let visible = max_tiles.saturating_sub(1);
        CellTiles {
            visible,
            overflow: event_count - visible,
        }
    }
}

/// Returns the start/end timestamps for the portion of `event` that appears on `date`.
/// Multi-day events are clipped to the day's midnight boundaries.
pub fn event_segment_for_date(
    event: &CalendarEvent,
    date: NaiveDate,
) -> Option<(NaiveDateTime, NaiveDateTime)> {
    if !event.occurs_on(date) {
        return None;
    }

    let day_start = date.and_time(chrono::NaiveTime::MIN);
    let day_end = day_start + Duration::days(1);
    let segment_start = event.start.max(day_start);
    let segment_end = event.end.min(day_end);

    (segment_start < segment_end).then_some((segment_start, segment_end))
}

/// Where a timed event tile sits in a day column.
#[derive(Debug, Clone, PartialEq)]
pub struct TilePlacement {
    pub event_id: Option<i64>,
    /// Zero-based column within its overlap cluster
    pub column: usize,
    /// Columns in the cluster; tile width is `1 / columns` of the day column
    pub columns: usize,
    pub top: f32,
    pub height: f32,
}

struct Slot {
    event_id: Option<i64>,
    start: u32,
    end: u32,
    column: usize,
}

/// Lay out the timed events of `date` side by side where they overlap.
///
/// Events are grouped into clusters of transitively overlapping tiles; each
/// takes the first column free at its start time. All-day events are skipped.
pub fn arrange_day_events(
    events: &[CalendarEvent],
    date: NaiveDate,
    minute_height: f32,
) -> Vec<TilePlacement> {
    let mut slots: Vec<Slot> = events
        .iter()
        .filter(|event| !event.all_day)
        .filter_map(|event| {
            let (start, end) = event_segment_for_date(event, date)?;
            let start_min = minutes_since_midnight(start.time());
            let end_min = if end.date() > date {
                MINUTES_PER_DAY
            } else {
                minutes_since_midnight(end.time())
            };
            Some(Slot {
                event_id: event.id,
                start: start_min,
                end: end_min.max(start_min + 1),
                column: 0,
            })
        })
        .collect();
    slots.sort_by_key(|slot| (slot.start, slot.end));

    let mut placements = Vec::with_capacity(slots.len());
    let mut cluster: Vec<Slot> = Vec::new();
    let mut column_ends: Vec<u32> = Vec::new();
    let mut cluster_end = 0;

    for mut slot in slots {
        if !cluster.is_empty() && slot.start >= cluster_end {
            flush_cluster(&mut cluster, column_ends.len(), minute_height, &mut placements);
            column_ends.clear();
        }

        slot.column = match column_ends.iter().position(|end| *end <= slot.start) {
            Some(column) => column,
            None => {
                column_ends.push(0);
                column_ends.len() - 1
            }
        };
        column_ends[slot.column] = slot.end;
        cluster_end = if cluster.is_empty() {
            slot.end
        } else {
            cluster_end.max(slot.end)
        };
        cluster.push(slot);
    }
    flush_cluster(&mut cluster, column_ends.len(), minute_height, &mut placements);

    placements
}

fn flush_cluster(
    cluster: &mut Vec<Slot>,
    columns: usize,
    minute_height: f32,
    placements: &mut Vec<TilePlacement>,
) {
    for slot in cluster.drain(..) {
        placements.push(TilePlacement {
            event_id: slot.event_id,
            column: slot.column,
            columns,
            top: slot.start as f32 * minute_height,
            height: (slot.end - slot.start) as f32 * minute_height,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn timed(id: i64, start: (u32, u32), end: (u32, u32)) -> CalendarEvent {
        let mut event = CalendarEvent::new(
            format!("event {}", id),
            day().and_hms_opt(start.0, start.1, 0).unwrap(),
            day().and_hms_opt(end.0, end.1, 0).unwrap(),
        )
        .unwrap();
        event.id = Some(id);
        event
    }

    #[test]
    fn test_month_cell_all_fit() {
        // 3 rows of 18 + 2 spacing fit in 60
        let tiles = month_cell_tiles(3, 60.0, 18.0, 2.0);
        assert_eq!(tiles, CellTiles { visible: 3, overflow: 0 });
    }

    #[test]
    fn test_month_cell_overflow_reserves_a_row() {
        let tiles = month_cell_tiles(5, 60.0, 18.0, 2.0);
        assert_eq!(tiles, CellTiles { visible: 2, overflow: 3 });
    }

    #[test]
    fn test_month_cell_degenerate_sizes() {
        assert_eq!(month_cell_tiles(2, 0.0, 18.0, 2.0), CellTiles { visible: 0, overflow: 2 });
        assert_eq!(month_cell_tiles(0, 0.0, 0.0, 0.0), CellTiles { visible: 0, overflow: 0 });
    }

    #[test]
    fn test_month_cell_tiles_capped() {
        assert_eq!(month_cell_tiles_capped(2, 3), CellTiles { visible: 2, overflow: 0 });
        assert_eq!(month_cell_tiles_capped(7, 3), CellTiles { visible: 2, overflow: 5 });
    }

    #[test]
    fn test_segment_clips_multi_day_event() {
        let start = day().and_hms_opt(22, 0, 0).unwrap();
        let event = CalendarEvent::new("Overnight", start, start + Duration::hours(4)).unwrap();

        let first = event_segment_for_date(&event, day()).unwrap();
        assert_eq!(first, (start, day().succ_opt().unwrap().and_hms_opt(0, 0, 0).unwrap()));

        let next_day = day().succ_opt().unwrap();
        let second = event_segment_for_date(&event, next_day).unwrap();
        assert_eq!(second.1, next_day.and_hms_opt(2, 0, 0).unwrap());

        assert!(event_segment_for_date(&event, day().pred_opt().unwrap()).is_none());
    }

    #[test]
    fn test_arrange_non_overlapping_events_use_one_column() {
        let events = vec![timed(1, (9, 0), (10, 0)), timed(2, (10, 0), (11, 0))];
        let placements = arrange_day_events(&events, day(), 1.0);

        assert_eq!(placements.len(), 2);
        assert!(placements.iter().all(|p| p.column == 0 && p.columns == 1));
        assert_eq!(placements[0].top, 540.0);
        assert_eq!(placements[0].height, 60.0);
    }

    #[test]
    fn test_arrange_overlapping_events_side_by_side() {
        let events = vec![
            timed(1, (9, 0), (11, 0)),
            timed(2, (9, 30), (10, 0)),
            timed(3, (10, 0), (10, 30)),
            timed(4, (13, 0), (14, 0)),
        ];
        let placements = arrange_day_events(&events, day(), 2.0);

        let find = |id: i64| placements.iter().find(|p| p.event_id == Some(id)).unwrap();
        assert_eq!((find(1).column, find(1).columns), (0, 2));
        assert_eq!((find(2).column, find(2).columns), (1, 2));
        // Reuses column 1 once event 2 has ended
        assert_eq!((find(3).column, find(3).columns), (1, 2));
        assert_eq!((find(4).column, find(4).columns), (0, 1));
        assert_eq!(find(4).top, 13.0 * 60.0 * 2.0);
    }

    #[test]
    fn test_arrange_skips_all_day_events() {
        let holiday = CalendarEvent::builder()
            .title("Holiday")
            .all_day_on(day())
            .build()
            .unwrap();
        assert!(arrange_day_events(&[holiday], day(), 1.0).is_empty());
    }

    #[test]
    fn test_arrange_event_running_past_midnight_fills_rest_of_day() {
        let start = day().and_hms_opt(23, 0, 0).unwrap();
        let event = CalendarEvent::new("Late", start, start + Duration::hours(3)).unwrap();
        let placements = arrange_day_events(&[event], day(), 1.0);
        assert_eq!(placements[0].height, 60.0);
    }
}
