use chrono::NaiveDate;
use serde::Serialize;

use crate::models::MoodEntry;

/// One vertex of a mood polyline, already scaled to the drawing box.
///
/// `y` grows with mood; flip it against the height for screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodPoint {
    pub date: NaiveDate,
    pub mood: u8,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodTrend {
    pub width: f64,
    pub height: f64,
    pub points: Vec<MoodPoint>,
}

impl MoodTrend {
    /// Normalize `entries` into a `width` x `height` box.
    ///
    /// x spreads evenly from 0 to `width` (a single point sits at 0); y maps
    /// the lowest mood to 0 and the highest to `height` (a flat series stays
    /// at 0). An empty input gives an empty trend.
    pub fn from_entries(entries: &[MoodEntry], width: f64, height: f64) -> Self {
        let points = match (
            entries.iter().map(|e| e.mood).min(),
            entries.iter().map(|e| e.mood).max(),
        ) {
            (Some(min), Some(max)) => {
                let range = f64::from(max - min);
                let last = entries.len().saturating_sub(1);
                entries
                    .iter()
                    .enumerate()
                    .map(|(i, entry)| {
                        let x = if last == 0 {
                            0.0
                        } else {
                            i as f64 / last as f64 * width
                        };
                        let y = if range == 0.0 {
                            0.0
                        } else {
                            f64::from(entry.mood - min) / range * height
                        };
                        MoodPoint {
                            date: entry.date,
                            mood: entry.mood,
                            x,
                            y,
                        }
                    })
                    .collect()
            }
            _ => Vec::new(),
        };

        Self {
            width,
            height,
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// SVG `points` attribute text with y flipped so higher moods draw on top.
    pub fn svg_points(&self) -> String {
        self.points
            .iter()
            .map(|p| format!("{},{}", p.x, self.height - p.y))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The last `size` entries in stored order; 0 keeps the whole series.
pub fn trailing_window(entries: &[MoodEntry], size: usize) -> &[MoodEntry] {
    if size == 0 || size >= entries.len() {
        entries
    } else {
        &entries[entries.len() - size..]
    }
}
