use crate::shared::constants::{GAZE_HIGH_THRESHOLD, GAZE_LOW_THRESHOLD};

pub const DEFAULT_METER_WIDTH: usize = 21;
const MIN_METER_WIDTH: usize = 3;

/// One-line debug view of the gaze position against the thresholds.
///
/// `[........:.|.:.*......] 0.70` with `:` at the thresholds, `|` at the
/// frame center and `*` at the current sample.
pub struct GazeMeter {
    width: usize,
}

impl GazeMeter {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(MIN_METER_WIDTH),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Renders the bar; `None` (no face this frame) leaves out the marker.
    pub fn render(&self, value: Option<f64>) -> String {
        let mut cells = vec!['.'; self.width];
        cells[self.cell(GAZE_LOW_THRESHOLD)] = ':';
        cells[self.cell(GAZE_HIGH_THRESHOLD)] = ':';
        cells[self.cell(0.5)] = '|';

        let label = match value {
            Some(x) => {
                cells[self.cell(x)] = '*';
                format!("{x:.2}")
            }
            None => "--".to_string(),
        };

        let bar: String = cells.into_iter().collect();
        format!("[{bar}] {label}")
    }

    fn cell(&self, x: f64) -> usize {
        let last = (self.width - 1) as f64;
        (x.clamp(0.0, 1.0) * last).round() as usize
    }
}

impl Default for GazeMeter {
    fn default() -> Self {
        Self::new(DEFAULT_METER_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_width() {
        assert_eq!(GazeMeter::default().width(), DEFAULT_METER_WIDTH);
    }

    #[test]
    fn test_width_has_lower_bound() {
        assert_eq!(GazeMeter::new(0).width(), MIN_METER_WIDTH);
    }

    #[test]
    fn test_render_without_sample() {
        let meter = GazeMeter::new(11);
        // 11 cells: LOW at 4, center at 5, HIGH at 6
        assert_eq!(meter.render(None), "[....:|:....] --");
    }

    #[rstest]
    #[case::left_edge(0.0, "[*...:|:....] 0.00")]
    #[case::right_edge(1.0, "[....:|:...*] 1.00")]
    #[case::center(0.5, "[....:*:....] 0.50")]
    #[case::past_high(0.8, "[....:|:.*..] 0.80")]
    fn test_render_places_marker(#[case] x: f64, #[case] expected: &str) {
        assert_eq!(GazeMeter::new(11).render(Some(x)), expected);
    }

    #[test]
    fn test_render_clamps_out_of_range_marker() {
        let meter = GazeMeter::new(11);
        assert!(meter.render(Some(1.4)).starts_with("[....:|:...*]"));
    }

    #[test]
    fn test_render_length_matches_width() {
        let meter = GazeMeter::new(31);
        let line = meter.render(Some(0.3));
        let bar = line.split(' ').next().unwrap();
        assert_eq!(bar.len(), 31 + 2);
    }
}
