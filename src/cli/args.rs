use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use bmfrm::PlaneWaveNormal;

#[derive(Parser)]
#[command(name = "bmfrm", version, about = "BMFRM CLI")]
pub struct CliArgs {
    /// Enable logging
    #[arg(long, global = true, default_value_t = false)]
    pub log: bool,

    /// Print JSON instead of a text table
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Per-element transmit delay tabs for a focus in front of a linear array
    Tabs(TabsArgs),
    /// Transmit delays from the array center to every point of an image grid
    Tof(TofArgs),
}

#[derive(Args)]
pub struct TabsArgs {
    /// Number of elements
    #[arg(long, default_value_t = 128)]
    pub nele: usize,

    /// Element pitch [m]
    #[arg(long, default_value_t = 0.298e-3)]
    pub pitch: f64,

    /// Lateral focus position [m]
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub focus_x: f64,

    /// Elevational focus position [m]
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub focus_y: f64,

    /// Focal depth [m]
    #[arg(long)]
    pub focus_z: f64,

    /// Speed of sound [m/s]
    #[arg(short, long, default_value_t = 1540.0)]
    pub c: f64,

    /// F-number of the aperture
    #[arg(long, default_value_t = 2.0)]
    pub fnum: f64,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum TofMode {
    Plane,
    Focused,
}

#[derive(Args)]
pub struct TofArgs {
    /// Transmit preset (JSON); replaces the mode, steering, focus, c and fnum flags
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Transmit excitation
    #[arg(long, value_enum, default_value_t = TofMode::Plane)]
    pub mode: TofMode,

    /// Steering angle in the xz plane [rad]
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub theta: f64,

    /// Steering angle in the yz plane [rad]
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub phi: f64,

    /// Plane-wave normal convention
    #[arg(long, value_enum, default_value_t = PlaneWaveNormal::Spherical)]
    pub normal: PlaneWaveNormal,

    /// Focal depth for focused mode [m]
    #[arg(long)]
    pub focus_z: Option<f64>,

    /// Firing time of the reference element [s]
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub tref: f64,

    /// Speed of sound [m/s]
    #[arg(short, long, default_value_t = 1540.0)]
    pub c: f64,

    /// F-number stored with the preset
    #[arg(long, default_value_t = 2.0)]
    pub fnum: f64,

    /// Number of axial pixels
    #[arg(long, default_value_t = 64)]
    pub nax: usize,

    /// Axial pixel spacing [m]
    #[arg(long, default_value_t = 0.5e-3)]
    pub dax: f64,

    /// Number of lateral pixels
    #[arg(long, default_value_t = 32)]
    pub nlat: usize,

    /// Lateral pixel spacing [m]
    #[arg(long, default_value_t = 0.3e-3)]
    pub dlat: f64,

    /// Axial coordinate of the upper-left corner [m]
    #[arg(long, default_value_t = 5e-3, allow_negative_numbers = true)]
    pub ulc_ax: f64,

    /// Lateral coordinate of the upper-left corner [m]
    #[arg(long, default_value_t = -4.8e-3, allow_negative_numbers = true)]
    pub ulc_lat: f64,
}
