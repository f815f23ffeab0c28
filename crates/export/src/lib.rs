//! Export helpers for trajectory CSV and analysis JSON artifacts.

pub mod trajectory {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    const HEADER: &str = "time,x0,y0,vx0,vy0,x1,y1,vx1,vy1,x2,y2,vx2,vy2,energy";

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// Write the standard trajectory CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// One sampled row: elapsed time, packed `(x, y, vx, vy)` per body, total energy.
    #[derive(Debug, Clone, Copy)]
    pub struct Sample {
        pub time: f64,
        pub state: [f64; 12],
        pub energy: f64,
    }

    impl Sample {
        /// Serialize the sample to CSV, matching the standard header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            write!(writer, "{:.6}", self.time)?;
            for value in &self.state {
                write!(writer, ",{:.9}", value)?;
            }
            writeln!(writer, ",{:.12}", self.energy)
        }
    }
}

pub mod report {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::io::{self, Write};

    /// Per-orbit analysis summary as written to JSON.
    #[derive(Debug, Clone, Serialize)]
    pub struct OrbitSummary {
        pub key: String,
        pub name: String,
        pub periodic: bool,
        pub period: Option<f64>,
        pub min_return_distance: f64,
        pub initial_energy: f64,
        pub max_energy_drift_percent: f64,
        pub final_energy_drift_percent: f64,
        pub energy_rating: String,
        pub lyapunov_estimate: f64,
        pub stability_rating: String,
    }

    #[derive(Serialize)]
    struct ReportEnvelope<'a> {
        generated_utc: &'a str,
        orbit_count: usize,
        orbits: &'a [OrbitSummary],
    }

    /// Write a pretty-printed JSON report of every analysed orbit.
    pub fn write_json(
        writer: &mut dyn Write,
        generated_utc: &str,
        orbits: &[OrbitSummary],
    ) -> io::Result<()> {
        let envelope = ReportEnvelope {
            generated_utc,
            orbit_count: orbits.len(),
            orbits,
        };
        to_writer_pretty(&mut *writer, &envelope)?;
        writeln!(writer)
    }
}
