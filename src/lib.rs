#![doc = r#"
BMFRM — geometric delay tabs and aperture masks for ultrasound delay-and-sum beamforming.

Given the speed of sound, element positions and a set of reconstruction or focal points,
this crate computes time-of-flight delays (seconds) under three excitation models and
f-number based inclusion masks. Everything is a pure function over `ndarray` arrays: no
state is kept between calls, and every output is index-aligned with the rows of its input
point set.

Conventions
-----------
- A point (`ref`, `focus`, `focal`) is any `f64` array with exactly three elements and one
  or two dimensions: `(3)`, `(1, 3)` or `(3, 1)`.
- A point set is a two-dimensional `N x 3` array. A flat `(3)` vector is rejected rather than
  treated as a single row.
- Depth is the z axis; the array lies in the z = 0 plane and images the half-space z > 0.

Receive and transmit delays
---------------------------
```rust
use ndarray::array;
use bmfrm::{receive_delay, plane_wave_delay, SteeringAngles};

fn main() -> bmfrm::Result<()> {
    let reference = array![0.0, 0.0, 0.0];
    let points = array![[0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [-1.0, -1.0, 0.0], [0.0, 0.0, 1.0]];

    let rx = receive_delay(2.0, &reference, &points)?;
    assert!((rx[3] - 0.5).abs() < 1e-12);

    let tx = plane_wave_delay(2.0, 0.5, SteeringAngles::default(), &reference, &points)?;
    assert!((tx[3] - 1.0).abs() < 1e-12);
    Ok(())
}
```

Element tabs for a focused transmit
-----------------------------------
```rust
use ndarray::array;
use bmfrm::{element_delays_and_mask, linear_array};

fn main() -> bmfrm::Result<()> {
    let eles = linear_array(128, 0.298e-3)?;
    let focus = array![0.0, 0.0, 28e-3];
    let (delays, mask) = element_delays_and_mask(1540.0, 2.0, &focus, &eles)?;

    // The active element with the longest path fires at zero and the rest wait.
    // Inactive elements are left to the caller.
    let active: Vec<f64> = delays
        .iter()
        .zip(mask.iter())
        .filter(|&(_, &m)| m)
        .map(|(&d, _)| d)
        .collect();
    assert_eq!(active.iter().copied().fold(f64::INFINITY, f64::min), 0.0);
    assert!(active.iter().all(|&d| d >= 0.0));
    Ok(())
}
```

Field apodization
-----------------
```rust
use ndarray::array;
use bmfrm::{field_mask, ApertureKind};

fn main() -> bmfrm::Result<()> {
    let element = array![0.0, 0.0, 0.0];
    let focus = array![0.0, 0.0, 0.03];
    let points = array![[0.0, 0.0, 0.02], [0.01, 0.0, 0.02]];
    let mask = field_mask(2.0, &element, &focus, &points, ApertureKind::Dynamic)?;
    assert_eq!(mask.to_vec(), vec![true, false]);
    Ok(())
}
```

Error handling
--------------
All public functions return `bmfrm::Result<T>`. Shape problems surface as `Error::Shape`
before any arithmetic, an f-number that selects no element as `Error::EmptyAperture`, and
degenerate geometry (for instance a focus in the array plane) as `Error::Domain`.

```rust
use ndarray::array;
use bmfrm::{receive_delay, Error};

let flat = array![0.0, 0.0, 1.0];
match receive_delay(1540.0, &array![0.0, 0.0, 0.0], &flat) {
    Err(Error::Shape { arg, .. }) => assert_eq!(arg, "points"),
    other => panic!("unexpected: {other:?}"),
}
```

Useful modules
--------------
- [`core::tof`](crate::core::tof) — receive, plane-wave and focused transmit delays.
- [`core::mask`](crate::core::mask) — field apodization masks and per-element transmit tabs.
- [`core::geometry`](crate::core::geometry) — linear arrays and image grids.
- [`core::params`](crate::core::params) — validated transmit presets (`TransmitParams`).
- [`api`] — caller-side helpers: dispatch from presets, zeroed element tabs, delay tables.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::params::{TransmitMode, TransmitParams};
pub use error::{Error, Result};
pub use types::{ApertureKind, PlaneWaveNormal, Point3, SteeringAngles};

// Engines
pub use crate::core::geometry::{ImageGrid, linear_array};
pub use crate::core::mask::{element_delays_and_mask, field_mask};
pub use crate::core::tof::{focused_delay, plane_wave_delay, plane_wave_delay_with, receive_delay};

// High-level API re-exports
pub use api::{
    ElementTabs, element_tabs, field_mask_table, receive_delay_table, transmit_delay,
    transmit_tabs,
};
