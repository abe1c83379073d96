use plotters::prelude::*;
use rand::seq::SliceRandom;
use rand::RngCore;

#[inline(always)]
pub fn argmax<T: PartialOrd>(values: impl Iterator<Item = T>) -> usize {
    values
        .enumerate()
        .max_by(|x, y| PartialOrd::partial_cmp(&x.1, &y.1).unwrap())
        .unwrap()
        .0
}

#[inline(always)]
pub fn max(values: &[f64]) -> f64 {
    values.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b))
}

/// Index of a maximal value, with exact ties broken uniformly at random:
/// the indices are visited in a uniformly shuffled order and the first
/// maximum wins.
pub fn shuffled_argmax(values: &[f64], rng: &mut dyn RngCore) -> usize {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.shuffle(rng);
    let mut best = order[0];
    for &i in &order[1..] {
        if values[i] > values[best] {
            best = i;
        }
    }
    best
}

pub fn moving_average(window: usize, values: &[f64]) -> Vec<f64> {
    let window = window.max(1);
    let mut result: Vec<f64> = vec![];
    let mut aux: usize = 0;
    while aux < values.len() {
        let end: usize = (aux + window).min(values.len());
        let sum: f64 = values[aux..end].iter().sum();
        result.push(sum / window as f64);
        aux = end;
    }
    result
}

pub fn plot_moving_average(series: &[Vec<f64>], colors: &[&RGBColor], legends: &[&str], title: &str) {
    let max_len = series.iter().map(|s| s.len()).max().unwrap_or(0);
    if max_len == 0 {
        return;
    }
    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;
    for data in series {
        for &v in data {
            min_v = min_v.min(v);
            max_v = max_v.max(v);
        }
    }
    let pad = 0.05 * (max_v - min_v).max(1e-6);

    let filename = format!("{}.png", title.replace(' ', "_").to_lowercase());
    let root = BitMapBackend::new(&filename, (1080, 720)).into_drawing_area();
    root.fill(&WHITE).expect("failed to clear the plot");
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0..max_len, (min_v - pad)..(max_v + pad))
        .expect("failed to build the chart");
    chart.configure_mesh().draw().expect("failed to draw the mesh");

    for ((data, &color), legend) in series.iter().zip(colors).zip(legends) {
        chart
            .draw_series(LineSeries::new(
                data.iter().enumerate().map(|(i, v)| (i, *v)),
                color,
            ))
            .expect("failed to draw a series")
            .label(*legend)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }
    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .expect("failed to draw the legend");
    root.present().expect("failed to write the plot");
}
