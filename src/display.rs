//! Plain-text leaderboard rendering for the transport layer.

use crate::score::ScoreRecord;

/// Render a high-score table: one ranked line per user plus a ten-segment
/// accuracy bar. Rows are ordered by accuracy, then by answer count, best
/// first; `limit` caps how many rows are rendered.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn render_leaderboard(rows: &[(String, ScoreRecord)], limit: Option<usize>) -> String {
    let mut sorted: Vec<&(String, ScoreRecord)> = rows.iter().collect();
    sorted.sort_by(|(_, a), (_, b)| {
        b.ratio()
            .partial_cmp(&a.ratio())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.total_asked.cmp(&a.total_asked))
    });
    if let Some(limit) = limit {
        sorted.truncate(limit);
    }

    let rank_width = sorted.len().to_string().len();
    let mut text = String::new();
    for (i, (name, record)) in sorted.iter().enumerate() {
        let full_bars = (record.ratio() / 10.0) as usize;
        let empty_bars = 10 - full_bars.min(10);
        if i > 0 {
            text.push('\n');
        }
        text.push_str(&format!(
            "{rank:>rank_width$}. {name}: {correct} / {asked}\n",
            rank = i + 1,
            correct = record.correct,
            asked = record.total_asked,
        ));
        text.push_str(&format!(
            "{pad}{full}{empty}  {ratio:5.2} %",
            pad = " ".repeat(rank_width + 2),
            full = "▬".repeat(full_bars.min(10)),
            empty = "▭".repeat(empty_bars),
            ratio = record.ratio(),
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(asked: u64, correct: u64) -> ScoreRecord {
        ScoreRecord {
            total_asked: asked,
            correct,
            ..ScoreRecord::default()
        }
    }

    #[test]
    fn test_ordering_by_ratio_then_volume() {
        let rows = vec![
            ("casual".to_string(), record(4, 2)),
            ("sharp".to_string(), record(10, 9)),
            ("grinder".to_string(), record(8, 4)),
        ];
        let text = render_leaderboard(&rows, None);
        let sharp = text.find("sharp").unwrap();
        let grinder = text.find("grinder").unwrap();
        let casual = text.find("casual").unwrap();
        // 50% ties broken by answer count.
        assert!(sharp < grinder);
        assert!(grinder < casual);
    }

    #[test]
    fn test_limit_caps_rows() {
        let rows = vec![
            ("a".to_string(), record(2, 2)),
            ("b".to_string(), record(2, 1)),
            ("c".to_string(), record(2, 0)),
        ];
        let text = render_leaderboard(&rows, Some(2));
        assert!(text.contains("a:"));
        assert!(text.contains("b:"));
        assert!(!text.contains("c:"));
    }

    #[test]
    fn test_bar_reflects_ratio() {
        let rows = vec![("perfect".to_string(), record(5, 5))];
        let text = render_leaderboard(&rows, None);
        assert!(text.contains(&"▬".repeat(10)));
        assert!(text.contains("100.00 %"));

        let rows = vec![("blank".to_string(), record(0, 0))];
        let text = render_leaderboard(&rows, None);
        assert!(text.contains(&"▭".repeat(10)));
    }

    #[test]
    fn test_empty_rows_render_empty() {
        assert_eq!(render_leaderboard(&[], None), "");
    }
}
