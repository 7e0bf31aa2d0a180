use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, Color32, Pos2, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::color::ColorMap;
use crate::data::summary::{AggregateSummary, LanguageShare};

const CHART_HEIGHT: f32 = 240.0;
const BAR_COLOR: Color32 = Color32::from_rgb(255, 75, 75);
const TREND_COLOR: Color32 = Color32::from_rgb(90, 140, 230);

// ---------------------------------------------------------------------------
// KPIs
// ---------------------------------------------------------------------------

/// Total books, distinct authors and the most common language, side by side.
pub fn kpi_row(ui: &mut Ui, summary: &AggregateSummary) {
    ui.columns(3, |cols: &mut [Ui]| {
        kpi(&mut cols[0], "Total books", thousands(summary.total_books));
        kpi(&mut cols[1], "Unique authors", thousands(summary.unique_authors));
        kpi(
            &mut cols[2],
            "Most common language",
            summary.most_common_language_label().to_string(),
        );
    });
}

fn kpi(ui: &mut Ui, caption: &str, value: String) {
    ui.group(|ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(caption).weak());
        ui.label(RichText::new(value).size(26.0).strong());
    });
}

/// `1234567` → `"1,234,567"`.
pub fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn no_data(ui: &mut Ui, message: &str) {
    ui.allocate_ui(egui::vec2(ui.available_width(), CHART_HEIGHT), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new(message).weak());
        });
    });
}

// ---------------------------------------------------------------------------
// Top authors – horizontal bar chart
// ---------------------------------------------------------------------------

/// Ranked bar chart; the most frequent author is drawn at the top.
pub fn author_bar_chart(ui: &mut Ui, summary: &AggregateSummary) {
    ui.strong("Top authors");
    if summary.top_authors.is_empty() {
        no_data(ui, "No authors to show");
        return;
    }

    let n = summary.top_authors.len();
    let bars: Vec<Bar> = summary
        .top_authors
        .iter()
        .enumerate()
        .map(|(rank, (author, count))| {
            Bar::new((n - rank) as f64, *count as f64)
                .name(author)
                .fill(BAR_COLOR)
        })
        .collect();

    Plot::new("top_authors")
        .height(CHART_HEIGHT)
        .show_axes([true, false])
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .include_x(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().width(0.7));
            for (rank, (author, count)) in summary.top_authors.iter().enumerate() {
                let label = RichText::new(format!("{author} ({count})")).color(Color32::WHITE);
                plot_ui.text(
                    Text::new(PlotPoint::new(0.0, (n - rank) as f64), label)
                        .anchor(Align2::LEFT_CENTER),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Publication trend – area chart
// ---------------------------------------------------------------------------

/// Books per publication year as a filled line.
pub fn trend_area_chart(ui: &mut Ui, summary: &AggregateSummary) {
    ui.strong("Publications per year");
    if summary.publication_trend.is_empty() {
        no_data(ui, "No dated books to show");
        return;
    }

    let points: Vec<[f64; 2]> = summary
        .publication_trend
        .iter()
        .map(|&(year, count)| [year as f64, count as f64])
        .collect();

    Plot::new("publication_trend")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Books")
        .include_y(0.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points.iter().copied().collect::<PlotPoints>())
                    .name("Books")
                    .color(TREND_COLOR)
                    .fill(0.0_f32),
            );
            plot_ui.points(
                Points::new(points.into_iter().collect::<PlotPoints>())
                    .radius(2.0)
                    .color(TREND_COLOR),
            );
        });
}

// ---------------------------------------------------------------------------
// Language shares – donut
// ---------------------------------------------------------------------------

const DONUT_SIZE: f32 = 200.0;
const DONUT_HOLE: f32 = 0.55;
/// Largest angle covered by one convex piece of a slice.
const MAX_PIECE_ANGLE: f32 = TAU / 120.0;

/// Donut of language shares with a legend; colours come from `colors`.
pub fn language_donut(ui: &mut Ui, summary: &AggregateSummary, colors: &ColorMap) {
    ui.strong("Languages");
    let shares = &summary.language_distribution;
    if shares.is_empty() {
        no_data(ui, "No languages to show");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(DONUT_SIZE, DONUT_SIZE), Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let outer = DONUT_SIZE / 2.0 - 4.0;
        let inner = outer * DONUT_HOLE;

        let mut start = -FRAC_PI_2;
        for share in shares {
            let end = start + TAU * share.percentage as f32 / 100.0;
            let color = colors.color_for(&share.language);
            for piece in ring_pieces(center, inner, outer, start, end) {
                painter.add(Shape::convex_polygon(piece, color, Stroke::NONE));
            }
            start = end;
        }

        let hovered = response
            .hover_pos()
            .and_then(|pos| slice_at(center, inner, outer, pos, shares));
        if let Some(share) = hovered {
            response.on_hover_text(format!(
                "{}: {} books ({:.1}%)",
                share.language,
                thousands(share.count),
                share.percentage
            ));
        }

        ui.vertical(|ui: &mut Ui| {
            for share in shares {
                ui.horizontal(|ui: &mut Ui| {
                    ui.label(RichText::new("■").color(colors.color_for(&share.language)));
                    ui.label(format!("{}  {:.1}%", share.language, share.percentage));
                });
            }
        });
    });
}

/// Split the ring sector between angles `start` and `end` (radians, screen
/// orientation) into convex quads.
pub fn ring_pieces(center: Pos2, inner: f32, outer: f32, start: f32, end: f32) -> Vec<Vec<Pos2>> {
    let sweep = end - start;
    if sweep <= 0.0 {
        return Vec::new();
    }
    let steps = (sweep / MAX_PIECE_ANGLE).ceil().max(1.0) as usize;
    let at = |r: f32, a: f32| center + r * egui::vec2(a.cos(), a.sin());

    (0..steps)
        .map(|i| {
            let a0 = start + sweep * i as f32 / steps as f32;
            let a1 = start + sweep * (i + 1) as f32 / steps as f32;
            vec![at(outer, a0), at(outer, a1), at(inner, a1), at(inner, a0)]
        })
        .collect()
}

/// The share drawn under `pos`, if any. Slices start at twelve o'clock and
/// run clockwise.
pub fn slice_at<'a>(
    center: Pos2,
    inner: f32,
    outer: f32,
    pos: Pos2,
    shares: &'a [LanguageShare],
) -> Option<&'a LanguageShare> {
    let d = pos - center;
    let r = d.length();
    if r < inner || r > outer {
        return None;
    }
    let angle = (d.y.atan2(d.x) + FRAC_PI_2).rem_euclid(TAU);
    let fraction = angle as f64 / TAU as f64 * 100.0;

    let mut acc = 0.0;
    for share in shares {
        acc += share.percentage;
        if fraction < acc {
            return Some(share);
        }
    }
    shares.last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::FacetValue;

    fn share(lang: &str, percentage: f64) -> LanguageShare {
        LanguageShare {
            language: FacetValue::known(lang),
            count: 0,
            percentage,
        }
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(150000), "150,000");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn ring_pieces_cover_sweep() {
        let center = Pos2::new(100.0, 100.0);
        let pieces = ring_pieces(center, 50.0, 90.0, 0.0, TAU / 4.0);
        assert!(pieces.len() >= 30);
        assert!(pieces.iter().all(|p| p.len() == 4));

        let first = pieces[0][0];
        assert!((first.x - 190.0).abs() < 1e-3 && (first.y - 100.0).abs() < 1e-3);
        let last = pieces.last().unwrap()[1];
        assert!((last.x - 100.0).abs() < 1e-3 && (last.y - 190.0).abs() < 1e-3);

        assert!(ring_pieces(center, 50.0, 90.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn hit_test_runs_clockwise_from_top() {
        let center = Pos2::new(0.0, 0.0);
        let shares = [share("te", 25.0), share("en", 75.0)];

        // Right of centre is a quarter turn clockwise from the top.
        let right = slice_at(center, 10.0, 20.0, Pos2::new(15.0, -1.0), &shares);
        assert_eq!(right.map(|s| s.language.label()), Some("te"));
        let below = slice_at(center, 10.0, 20.0, Pos2::new(0.0, 15.0), &shares);
        assert_eq!(below.map(|s| s.language.label()), Some("en"));

        assert!(slice_at(center, 10.0, 20.0, Pos2::new(1.0, 1.0), &shares).is_none());
        assert!(slice_at(center, 10.0, 20.0, Pos2::new(30.0, 0.0), &shares).is_none());
    }
}
