//! Geometry of the economy leaderboard. The web shell paints it on the
//! `economy-leaderboard-chart` canvas.

use crate::model::TopUser;
use crate::render::truncate_chars;

pub const EMPTY_LEADERBOARD: &str = "No balances yet.";
pub const BAR_FILL: &str = "rgba(255, 193, 7, 0.5)";
pub const BAR_STROKE: &str = "rgba(255, 193, 7, 1)";
pub const AXIS_STROKE: &str = "rgba(255, 255, 255, 0.25)";
pub const LABEL_FILL: &str = "rgba(255, 255, 255, 0.85)";
pub const LABEL_FONT: &str = "12px sans-serif";

const TOP_PADDING: f64 = 16.0;
const LABEL_BAND: f64 = 40.0;
const SIDE_PADDING: f64 = 8.0;
const BAR_RATIO: f64 = 0.7;
const LABEL_OFFSET: f64 = 16.0;
const LABEL_CHARS: usize = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
    pub label_x: f64,
    pub label_y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardChart {
    pub width: f64,
    pub height: f64,
    /// Y of the axis line every bar stands on.
    pub baseline: f64,
    pub axis_start: f64,
    pub axis_end: f64,
    pub bars: Vec<ChartBar>,
}

impl LeaderboardChart {
    /// Lays out one bar per user, scaled to the largest balance. Negative
    /// balances draw as empty bars.
    pub fn layout(top_users: &[TopUser], width: f64, height: f64) -> Self {
        let baseline = (height - LABEL_BAND).max(TOP_PADDING);
        let plot_height = baseline - TOP_PADDING;
        let slot = if top_users.is_empty() {
            0.0
        } else {
            (width - 2.0 * SIDE_PADDING).max(0.0) / top_users.len() as f64
        };
        let bar_width = slot * BAR_RATIO;
        let max_balance = top_users
            .iter()
            .map(|user| user.balance.max(0))
            .max()
            .unwrap_or(0)
            .max(1) as f64;

        let bars = top_users
            .iter()
            .enumerate()
            .map(|(index, user)| {
                let bar_height = user.balance.max(0) as f64 / max_balance * plot_height;
                let x = SIDE_PADDING + slot * index as f64 + (slot - bar_width) / 2.0;
                let (mut label, cut) = truncate_chars(&user.username, LABEL_CHARS);
                if cut {
                    label.push('…');
                }
                ChartBar {
                    x,
                    y: baseline - bar_height,
                    width: bar_width,
                    height: bar_height,
                    label,
                    label_x: x + bar_width / 2.0,
                    label_y: baseline + LABEL_OFFSET,
                }
            })
            .collect();

        Self {
            width,
            height,
            baseline,
            axis_start: SIDE_PADDING,
            axis_end: width - SIDE_PADDING,
            bars,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    fn user(name: &str, balance: i64) -> TopUser {
        TopUser {
            username: name.to_string(),
            balance,
        }
    }

    #[test]
    fn bars_scale_to_top_balance() {
        let chart = LeaderboardChart::layout(&[user("rich", 1000), user("poor", 500)], 600.0, 260.0);
        assert_close(chart.baseline, 220.0);
        assert_close(chart.bars[0].height, 204.0);
        assert_close(chart.bars[1].height, 102.0);
        assert_close(chart.bars[0].y, 16.0);
        assert_close(chart.bars[1].y, 118.0);
        assert_close(chart.bars[0].label_y, 236.0);
    }

    #[test]
    fn bars_share_width_evenly() {
        let chart = LeaderboardChart::layout(&[user("a", 1), user("b", 1)], 600.0, 260.0);
        let first = &chart.bars[0];
        let second = &chart.bars[1];
        assert_close(second.x - first.x, 292.0);
        assert_close(first.width, 204.4);
        assert_close(first.label_x, first.x + first.width / 2.0);
    }

    #[test]
    fn long_names_and_negative_balances() {
        let chart = LeaderboardChart::layout(
            &[user("a-very-long-username", -5), user("b", 0)],
            300.0,
            150.0,
        );
        assert_eq!(chart.bars[0].label, "a-very-long-…");
        assert_close(chart.bars[0].height, 0.0);
        assert_close(chart.bars[1].height, 0.0);
    }

    #[test]
    fn no_users_means_no_bars() {
        let chart = LeaderboardChart::layout(&[], 600.0, 260.0);
        assert!(chart.is_empty());
        assert_close(chart.axis_end, 592.0);
    }
}
