use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rendezvous::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

mod provenance;

#[derive(Parser)]
#[command(name = "rendezvous")]
#[command(about = "Isochrone intersection and polygon helpers on GeoJSON input")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Intersect GeoJSON polygons (one per file, or a JSON array of polygons per file)
    Intersect {
        #[arg(long = "input", required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,
        /// Only emit the largest region (or null)
        #[arg(long)]
        largest: bool,
        /// Write here (plus a provenance sidecar) instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Approximate a geodesic circle as a GeoJSON polygon
    Circle {
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Radius in metres
        #[arg(long)]
        radius: f64,
        #[arg(long, default_value_t = DEFAULT_CIRCLE_SEGMENTS)]
        segments: usize,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print bounding box, centroid, and area of a polygon
    Measure {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Intersect { inputs, largest, out } => {
            let params = json!({ "command": "intersect", "largest": largest });
            let doc = intersect(&inputs, largest)?;
            emit(&doc, out.as_deref(), params, &inputs)
        }
        Action::Circle {
            lon,
            lat,
            radius,
            segments,
            out,
        } => {
            let params = json!({ "command": "circle", "lon": lon, "lat": lat, "radius": radius, "segments": segments });
            let doc = circle(lon, lat, radius, segments)?;
            emit(&doc, out.as_deref(), params, &[])
        }
        Action::Measure { input } => {
            let doc = measure(&input)?;
            println!("{}", serde_json::to_string_pretty(&doc)?);
            Ok(())
        }
        Action::Report => report(),
    }
}

/// Read one polygon, or an array of polygons, from a JSON file.
fn load_polygons(path: &Path) -> Result<Vec<Polygon>> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value: Value =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    let polygons = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|p| vec![p])
    };
    polygons.with_context(|| format!("{} is not a GeoJSON Polygon (or array of them)", path.display()))
}

fn intersect(inputs: &[PathBuf], largest: bool) -> Result<Value> {
    let mut polygons = Vec::new();
    for path in inputs {
        polygons.extend(load_polygons(path)?);
    }
    tracing::info!(polygons = polygons.len(), largest, "intersect");
    let doc = if largest {
        serde_json::to_value(intersect_one(&polygons))?
    } else {
        let regions = intersect_all(&polygons);
        tracing::info!(regions = regions.len(), "intersection done");
        serde_json::to_value(regions)?
    };
    Ok(doc)
}

fn circle(lon: f64, lat: f64, radius: f64, segments: usize) -> Result<Value> {
    let polygon = circle_to_polygon(Vector2::new(lon, lat), radius, segments)
        .context("building circle polygon")?;
    Ok(serde_json::to_value(polygon)?)
}

fn measure(input: &Path) -> Result<Value> {
    let polygons = load_polygons(input)?;
    let [polygon] = polygons.as_slice() else {
        bail!("{} must hold exactly one polygon, found {}", input.display(), polygons.len());
    };
    Ok(json!({
        "bbox": bounding_box(polygon),
        "centroid": centroid(polygon),
        "areaM2": area(polygon),
    }))
}

/// Print to stdout, or write the artifact plus its provenance sidecar.
fn emit(doc: &Value, out: Option<&Path>, params: Value, inputs: &[PathBuf]) -> Result<()> {
    let Some(out) = out else {
        println!("{}", serde_json::to_string_pretty(doc)?);
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(out, serde_json::to_vec_pretty(doc)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let sidecar = provenance::Record::new(out, params, inputs).write()?;
    tracing::info!(out = %out.display(), sidecar = %sidecar.display(), "wrote artifact");
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "version": rendezvous::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, v: Value) -> PathBuf {
        let p = dir.join(name);
        fs::write(&p, serde_json::to_vec(&v).unwrap()).unwrap();
        p
    }

    fn square(x0: f64, y0: f64, side: f64) -> Value {
        json!({
            "type": "Polygon",
            "coordinates": [[[x0, y0], [x0 + side, y0], [x0 + side, y0 + side], [x0, y0 + side], [x0, y0]]]
        })
    }

    #[test]
    fn intersect_files_and_arrays() {
        let dir = tempdir().unwrap();
        let a = write(dir.path(), "a.json", square(0.0, 0.0, 10.0));
        let bc = write(dir.path(), "bc.json", json!([square(5.0, 5.0, 10.0), square(3.0, 3.0, 5.0)]));
        let out = intersect(&[a.clone(), bc.clone()], false).unwrap();
        assert_eq!(out.as_array().unwrap().len(), 1);
        let best = intersect(&[a, bc], true).unwrap();
        assert_eq!(best["type"], "Polygon");
    }

    #[test]
    fn no_overlap_largest_is_null() {
        let dir = tempdir().unwrap();
        let a = write(dir.path(), "a.json", square(0.0, 0.0, 1.0));
        let b = write(dir.path(), "b.json", square(5.0, 5.0, 1.0));
        assert!(intersect(&[a, b], true).unwrap().is_null());
    }

    #[test]
    fn rejects_non_polygon_input() {
        let dir = tempdir().unwrap();
        let line = write(
            dir.path(),
            "line.json",
            json!({"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]}),
        );
        assert!(load_polygons(&line).is_err());
        assert!(load_polygons(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn circle_and_measure() {
        let doc = circle(-0.1276, 51.5072, 5000.0, 64).unwrap();
        assert_eq!(doc["coordinates"][0].as_array().unwrap().len(), 65);
        assert!(circle(0.0, 0.0, -1.0, 64).is_err());

        let dir = tempdir().unwrap();
        let p = write(dir.path(), "c.json", doc);
        let m = measure(&p).unwrap();
        let area = m["areaM2"].as_f64().unwrap();
        let disc = std::f64::consts::PI * 5000.0 * 5000.0;
        assert!((area - disc).abs() / disc < 0.02, "area = {area}");
        assert!((m["centroid"]["lat"].as_f64().unwrap() - 51.5072).abs() < 1e-3);
    }

    #[test]
    fn emit_writes_artifact_and_sidecar() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested").join("regions.json");
        emit(&json!([]), Some(&out), json!({"command": "intersect"}), &[PathBuf::from("a.json")]).unwrap();
        assert!(out.exists());
        let sidecar = dir.path().join("nested").join("regions.provenance.json");
        let parsed: Value = serde_json::from_slice(&fs::read(sidecar).unwrap()).unwrap();
        assert_eq!(parsed["inputs"][0], "a.json");
        assert_eq!(parsed["output"], out.display().to_string());
        assert_eq!(parsed["params"]["command"], "intersect");
    }
}
