use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::path::Path;

use plotters::prelude::*;

use crate::flow_analyzer::EvaluationSummary;
use crate::global_variables::LEARNING_CURVE_SMOOTHING_WINDOW;

/// Writes the comparison table to a CSV file, one row per evaluated agent.
pub fn log_evaluation_results(
    path: &Path,
    results: &[EvaluationSummary],
) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    for result in results {
        wtr.serialize(result)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Dumps a learned weight map as pretty JSON for offline inspection.
pub fn export_weights(
    path: &Path,
    weights: &HashMap<&'static str, f64>,
) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, weights)?;
    Ok(())
}

/// Moving-average smoothing for noisy per-episode series. Series shorter
/// than the window are returned unchanged.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || values.len() < window {
        return values.to_vec();
    }
    values
        .windows(window)
        .map(|chunk| chunk.iter().sum::<f64>() / window as f64)
        .collect()
}

/// Draws one smoothed line per labeled series, e.g. reward per episode for
/// each eagerness distribution.
pub fn plot_learning_curves(
    path: &Path,
    caption: &str,
    y_label: &str,
    curves: &[(String, Vec<f64>)],
) -> Result<(), Box<dyn Error>> {
    let smoothed: Vec<(String, Vec<f64>)> = curves
        .iter()
        .map(|(label, values)| {
            (
                label.clone(),
                moving_average(values, LEARNING_CURVE_SMOOTHING_WINDOW),
            )
        })
        .collect();

    let max_len = smoothed.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
    if max_len == 0 {
        return Err("no learning curve data to plot".into());
    }
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for (_, values) in &smoothed {
        for &value in values {
            y_min = y_min.min(value);
            y_max = y_max.max(value);
        }
    }
    if y_min == y_max {
        y_min -= 1.0;
        y_max += 1.0;
    }

    let backend = BitMapBackend::new(path, (1200, 700));
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 24))
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0..max_len, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("episode")
        .y_desc(y_label)
        .draw()?;

    for (index, (label, values)) in smoothed.iter().enumerate() {
        let color = Palette99::pick(index).mix(0.9);
        chart
            .draw_series(LineSeries::new(
                values.iter().enumerate().map(|(x, &y)| (x, y)),
                color.stroke_width(2),
            ))?
            .label(label.clone())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Bar chart of average reward per agent. Rewards are penalties, so bars
/// hang below zero and shorter is better.
pub fn plot_reward_comparison(
    path: &Path,
    results: &[EvaluationSummary],
) -> Result<(), Box<dyn Error>> {
    if results.is_empty() {
        return Err("no evaluation results to plot".into());
    }

    let mut y_min = results
        .iter()
        .map(|r| r.avg_reward)
        .fold(f64::INFINITY, f64::min)
        * 1.1;
    if y_min >= 0.0 {
        y_min = -1.0;
    }
    let y_max = 0.0;

    let backend = BitMapBackend::new(path, (1200, 700));
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Average reward per agent", ("sans-serif", 24))
        .margin(30)
        .x_label_area_size(120)
        .y_label_area_size(70)
        .build_cartesian_2d(0..results.len(), y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(results.len())
        .x_label_formatter(&|index| {
            results
                .get(*index)
                .map(|r| r.name.clone())
                .unwrap_or_default()
        })
        .y_desc("average reward")
        .draw()?;

    chart.draw_series(results.iter().enumerate().map(|(index, result)| {
        let color = if result.name.starts_with("rl") {
            GREEN.filled()
        } else {
            RGBColor(255, 165, 0).filled()
        };
        let mut bar = Rectangle::new([(index, 0.0), (index + 1, result.avg_reward)], color);
        bar.set_margin(0, 0, 10, 10);
        bar
    }))?;

    root.present()?;
    Ok(())
}
