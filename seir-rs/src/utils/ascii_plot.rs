use std::iter;

use crate::prelude::{Real, INF};

/// ASCII plot of a sequence of positive values.
///
/// Draw each point as a column filled with '*'s up to the maximum height.
pub fn render_vbars(values: &[Real], height: usize) -> String {
    let mut out = String::new();
    if values.is_empty() || height == 0 {
        return out;
    }
    let max = values.iter().cloned().fold(-INF, |x, y| x.max(y));
    let step = max / height as Real;

    for i in 0..height + 1 {
        let h = (height - i) as Real * step;
        for &x in values {
            out.push(if x >= h { '*' } else { ' ' });
        }
        out.push('\n');
    }
    out
}

/// ASCII plot of a sequence of positive values horizontally.
///
/// Draw each value as a row filled with '='s up to the maximum width.
pub fn render_hbars(values: &[Real], width: usize) -> String {
    let mut out = String::new();
    if values.is_empty() {
        return out;
    }
    let max = values.iter().cloned().fold(-INF, |x, y| x.max(y));
    let step = max / width as Real;

    for &x in values {
        let n = if step > 0.0 { (x / step) as usize } else { 0 };
        out.push('|');
        out.extend(iter::repeat('=').take(n));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hbars_scale_to_width() {
        let plot = render_hbars(&[1.0, 2.0, 4.0], 8);
        let lines: Vec<&str> = plot.lines().collect();
        assert_eq!(lines, vec!["|==", "|====", "|========"]);
    }

    #[test]
    fn vbars_have_one_column_per_value() {
        let plot = render_vbars(&[0.0, 1.0, 2.0], 2);
        let lines: Vec<&str> = plot.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "  *");
        assert_eq!(lines[2], "***");
    }

    #[test]
    fn empty_plots() {
        assert!(render_vbars(&[], 10).is_empty());
        assert!(render_hbars(&[], 10).is_empty());
        assert_eq!(render_hbars(&[0.0, 0.0], 4), "|\n|\n");
    }
}
