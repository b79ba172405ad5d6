//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed width, one row per bin), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Row elements, left to right:
//! - `#`: content below the −1σ edge
//! - `=`: the −1σ band up to the content
//! - `-`: the +1σ band above the content

use crate::domain::{FakeBin, FakeHistogram};

/// Render one horizontal bar per bin, scaled to the largest `content + error`.
pub fn render_histogram(histogram: &FakeHistogram, width: usize) -> String {
    let width = width.max(10);
    let max = histogram
        .bins
        .iter()
        .map(|b| b.content + b.error)
        .fold(0.0_f64, f64::max);

    let mut out = String::new();
    out.push_str(&format!("Plot: fakes | y=[0, {max:.2}]\n"));
    for b in &histogram.bins {
        out.push_str(&format!("{:>5} |{}|\n", b.bin, render_row(b, max, width)));
    }
    out
}

fn render_row(bin: &FakeBin, max: f64, width: usize) -> String {
    let lo = map_x((bin.content - bin.error).max(0.0), max, width);
    let mid = map_x(bin.content, max, width);
    let hi = map_x(bin.content + bin.error, max, width);

    (0..width)
        .map(|x| {
            if x < lo {
                '#'
            } else if x < mid {
                '='
            } else if x < hi {
                '-'
            } else {
                ' '
            }
        })
        .collect()
}

fn map_x(v: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || !v.is_finite() {
        return 0;
    }
    let x = (v / max * width as f64).round();
    x.clamp(0.0, width as f64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CombinedEstimate;

    fn bin(bin: usize, content: f64, error: f64) -> FakeBin {
        FakeBin {
            bin,
            low_edge: None,
            high_edge: None,
            estimate: CombinedEstimate {
                nominal_value: content,
                standard_deviation: error,
            },
            content,
            error,
        }
    }

    #[test]
    fn bars_are_deterministic() {
        let h = FakeHistogram {
            bins: vec![bin(0, 0.0, 0.0), bin(1, 4.0, 1.0), bin(2, 1.0, 2.0)],
        };
        let txt = render_histogram(&h, 10);
        let expected = concat!(
            "Plot: fakes | y=[0, 5.00]\n",
            "    0 |          |\n",
            "    1 |######==--|\n",
            "    2 |==----    |\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_histogram_has_header_only() {
        let txt = render_histogram(&FakeHistogram::default(), 20);
        assert_eq!(txt, "Plot: fakes | y=[0, 0.00]\n");
    }
}
