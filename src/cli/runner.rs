use std::fs;

use ndarray::{Array1, arr1};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bmfrm::core::geometry::{ImageGrid, linear_array};
use bmfrm::{
    ElementTabs, Point3, SteeringAngles, TransmitMode, TransmitParams, element_tabs,
    transmit_delay,
};

use super::args::{CliArgs, Command, TabsArgs, TofArgs, TofMode};
use super::errors::AppError;

#[derive(Serialize)]
struct ElementRow {
    index: usize,
    x: f64,
    delay: f64,
    active: bool,
}

#[derive(Serialize)]
struct TabsReport {
    c: f64,
    fnum: f64,
    focus: Point3,
    active: usize,
    elements: Vec<ElementRow>,
}

#[derive(Serialize)]
struct TofReport {
    params: TransmitParams,
    tref: f64,
    grid: ImageGrid,
    /// Delays [s], one row per axial pixel
    delays: Vec<Vec<f64>>,
}

fn run_tabs(args: &TabsArgs, json: bool) -> Result<(), AppError> {
    let eles = linear_array(args.nele, args.pitch)?;
    let focus = Point3::new(args.focus_x, args.focus_y, args.focus_z);
    info!(
        "Element tabs: nele={}, pitch={}, focus={}, c={}, fnum={}",
        args.nele, args.pitch, focus, args.c, args.fnum
    );

    let tabs: ElementTabs = element_tabs(args.c, args.fnum, &arr1(&focus.to_array()), &eles)?;
    let elements: Vec<ElementRow> = (0..args.nele)
        .map(|i| ElementRow {
            index: i,
            x: eles[[i, 0]],
            delay: tabs.delays[i],
            active: tabs.mask[i],
        })
        .collect();

    if json {
        let report = TabsReport {
            c: args.c,
            fnum: args.fnum,
            focus,
            active: tabs.active_count(),
            elements,
        };
        println!("{}", serde_json::to_string_pretty(&report).map_err(bmfrm::Error::from)?);
    } else {
        println!("{:>5} {:>12} {:>12} {:>7}", "idx", "x [mm]", "delay [us]", "active");
        for row in &elements {
            println!(
                "{:>5} {:>12.4} {:>12.4} {:>7}",
                row.index,
                row.x * 1e3,
                row.delay * 1e6,
                row.active
            );
        }
        println!(
            "{} of {} elements active, max delay {:.4} us",
            tabs.active_count(),
            args.nele,
            tabs.max_delay() * 1e6
        );
    }
    Ok(())
}

fn tof_params(args: &TofArgs) -> Result<TransmitParams, AppError> {
    if let Some(path) = &args.config {
        info!("Loading transmit preset: {:?}", path);
        let text = fs::read_to_string(path)?;
        return Ok(TransmitParams::from_json(&text)?);
    }

    let steer = SteeringAngles::new(args.theta, args.phi);
    let mode = match args.mode {
        TofMode::Plane => TransmitMode::plane_wave(steer),
        TofMode::Focused => {
            let z = args.focus_z.ok_or(AppError::MissingArgument {
                arg: "--focus-z".to_string(),
            })?;
            TransmitMode::focused(steer, Point3::new(0.0, 0.0, z))
        }
    };
    Ok(TransmitParams::new(mode, args.c, args.fnum, args.normal)?)
}

fn run_tof(args: &TofArgs, json: bool) -> Result<(), AppError> {
    let params = tof_params(args)?;
    let grid = ImageGrid::new(
        args.nax,
        args.dax,
        args.nlat,
        args.dlat,
        [args.ulc_ax, args.ulc_lat],
    )?;
    info!(
        "Transmit delays: mode={:?}, grid {}x{}",
        params.mode, grid.nax, grid.nlat
    );

    let reference = Array1::<f64>::zeros(3);
    let tau = transmit_delay(&params, args.tref, &reference, &grid.points())?;
    let delays: Vec<Vec<f64>> = tau
        .as_slice()
        .map(|s| s.chunks(grid.nlat).map(|r| r.to_vec()).collect())
        .unwrap_or_default();

    if json {
        let report = TofReport {
            params,
            tref: args.tref,
            grid,
            delays,
        };
        println!("{}", serde_json::to_string_pretty(&report).map_err(bmfrm::Error::from)?);
    } else {
        let axial = grid.axial();
        for (z, row) in axial.iter().zip(&delays) {
            let cells: Vec<String> = row.iter().map(|d| format!("{:.3}", d * 1e6)).collect();
            println!("{:>8.3} mm | {}", z * 1e3, cells.join(" "));
        }
        let (lo, hi) = tau
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &d| {
                (lo.min(d), hi.max(d))
            });
        println!("delays span {:.4} .. {:.4} us", lo * 1e6, hi * 1e6);
    }
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    match &args.command {
        Command::Tabs(tabs) => run_tabs(tabs, args.json)?,
        Command::Tof(tof) => run_tof(tof, args.json)?,
    }

    Ok(())
}
