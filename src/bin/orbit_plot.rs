use clap::Parser;
use csv::ReaderBuilder;
use plotters::prelude::*;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render three-body trajectories from an orbit_trace CSV"
)]
struct Cli {
    #[arg(long)]
    input: String,
    #[arg(long, default_value = "artifacts/orbit.png")]
    output: PathBuf,
    #[arg(long, default_value = "Three-body trajectories")]
    title: String,
    #[arg(long, default_value_t = 900)]
    width: u32,
    #[arg(long, default_value_t = 900)]
    height: u32,
}

const BODY_COLORS: [RGBColor; 3] = [
    RGBColor(220, 60, 50),
    RGBColor(40, 110, 200),
    RGBColor(30, 150, 80),
];

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let paths = read_paths(&cli.input)?;

    let points = paths.iter().flatten();
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !(x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite()) {
        return Err(anyhow::anyhow!("No finite positions in the provided CSV"));
    }
    // square extent centred on the data so orbits are not distorted
    let half = 0.5 * (x_max - x_min).max(y_max - y_min).max(1e-6) * 1.1;
    let (cx, cy) = (0.5 * (x_min + x_max), 0.5 * (y_min + y_max));

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path contains invalid UTF-8"))?;
    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 16.0, FontStyle::Normal);

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(cli.title.clone(), caption_font)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((cx - half)..(cx + half), (cy - half)..(cy + half))?;

    chart
        .configure_mesh()
        .x_desc("x")
        .y_desc("y")
        .label_style(label_font.clone())
        .draw()?;

    for (body, path) in paths.iter().enumerate() {
        let color = BODY_COLORS[body];
        chart
            .draw_series(LineSeries::new(
                path.iter().copied(),
                ShapeStyle::from(&color).stroke_width(2),
            ))?
            .label(format!("body {body}"))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));

        if let Some(&start) = path.first() {
            chart.draw_series(std::iter::once(Circle::new(start, 5, color.filled())))?;
        }
    }

    chart
        .configure_series_labels()
        .label_font(label_font)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

/// Per-body `(x, y)` polylines, skipping rows with non-finite positions.
fn read_paths(path: &str) -> anyhow::Result<[Vec<(f64, f64)>; 3]> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow::anyhow!("CSV missing '{}' column", name))
    };
    let mut columns = [(0usize, 0usize); 3];
    for (body, slot) in columns.iter_mut().enumerate() {
        *slot = (column(&format!("x{body}"))?, column(&format!("y{body}"))?);
    }

    let mut paths: [Vec<(f64, f64)>; 3] = Default::default();
    for record in rdr.records() {
        let record = record?;
        for (body, (xi, yi)) in columns.iter().enumerate() {
            let x: f64 = record.get(*xi).unwrap_or("").trim().parse().unwrap_or(f64::NAN);
            let y: f64 = record.get(*yi).unwrap_or("").trim().parse().unwrap_or(f64::NAN);
            if x.is_finite() && y.is_finite() {
                paths[body].push((x, y));
            }
        }
    }

    if paths.iter().all(|p| p.is_empty()) {
        return Err(anyhow::anyhow!("No trajectory samples in the provided CSV"));
    }
    Ok(paths)
}
