use crate::models::ActivitySummary;
use crate::ui::escape_html;
use std::fmt::Write;

const WIDTH: u32 = 640;
const LABEL_WIDTH: u32 = 230;
const BAR_AREA: u32 = 340;
const ROW_HEIGHT: u32 = 34;
const BAR_HEIGHT: u32 = 20;
const PADDING: u32 = 12;

/// Horizontal bar chart, one bar per activity in the given order. Bar length
/// is proportional to count; the largest count fills the bar area.
pub fn render_bar_chart(rows: &[ActivitySummary]) -> String {
    let height = PADDING * 2 + ROW_HEIGHT * rows.len() as u32;
    let max = rows.iter().map(|row| row.count).max().unwrap_or(0).max(1);

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg class="chart" viewBox="0 0 {WIDTH} {height}" role="img" aria-label="Resumen de actividades">"#
    );

    for (idx, row) in rows.iter().enumerate() {
        let top = PADDING + ROW_HEIGHT * idx as u32;
        let bar_y = top + (ROW_HEIGHT - BAR_HEIGHT) / 2;
        let text_y = top + ROW_HEIGHT / 2 + 4;
        let bar_width = (row.count as f64 / max as f64 * f64::from(BAR_AREA)).round() as u32;
        let label = escape_html(&row.activity);

        let _ = write!(
            svg,
            r#"<g class="bar"><text class="chart-label" x="{lx}" y="{text_y}" text-anchor="end">{label}</text><rect class="chart-bar" x="{LABEL_WIDTH}" y="{bar_y}" width="{bar_width}" height="{BAR_HEIGHT}" rx="4"><title>{label}: {count}</title></rect><text class="chart-value" x="{vx}" y="{text_y}">{pct}%</text></g>"#,
            lx = LABEL_WIDTH - 10,
            vx = LABEL_WIDTH + bar_width + 8,
            count = row.count,
            pct = row.percentage,
        );
    }

    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(activity: &str, count: u64, percentage: u32) -> ActivitySummary {
        ActivitySummary {
            activity: activity.to_string(),
            count,
            percentage,
        }
    }

    #[test]
    fn bars_follow_summary_order_and_scale_to_largest() {
        let svg = render_bar_chart(&[row("TSS", 2, 67), row("SERVIDUMBRE", 1, 33)]);

        let tss = svg.find(">TSS<").expect("TSS label");
        let serv = svg.find(">SERVIDUMBRE<").expect("SERVIDUMBRE label");
        assert!(tss < serv);
        assert!(svg.contains(r#"width="340""#));
        assert!(svg.contains(r#"width="170""#));
        assert!(svg.contains(">67%<"));
        assert!(svg.contains(">33%<"));
        assert_eq!(svg.matches("<rect").count(), 2);
    }

    #[test]
    fn labels_are_escaped() {
        let svg = render_bar_chart(&[row("A & <B>", 1, 100)]);
        assert!(svg.contains("A &amp; &lt;B&gt;"));
        assert!(!svg.contains("<B>"));
    }

    #[test]
    fn no_rows_draws_an_empty_frame() {
        let svg = render_bar_chart(&[]);
        assert!(svg.starts_with("<svg"));
        assert!(!svg.contains("<rect"));
    }
}
