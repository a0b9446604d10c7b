//! Time-of-flight engine: one-way receive delays, steered plane-wave transmit
//! delays and focused transmit delays from a reference element to a set of
//! field points. All functions are pure; outputs are aligned with the rows of
//! `points`.
use ndarray::{Array1, ArrayBase, ArrayView2, ArrayViewMut1, Data, Dimension, Zip};
use tracing::debug;

use crate::core::validate::{self, row_point};
use crate::error::{Error, Result};
use crate::types::{PlaneWaveNormal, Point3, SteeringAngles};

/// Distance from `reference` to every point, divided by `c` (seconds).
pub fn receive_delay<S1, D1, S2, D2>(
    c: f64,
    reference: &ArrayBase<S1, D1>,
    points: &ArrayBase<S2, D2>,
) -> Result<Array1<f64>>
where
    S1: Data<Elem = f64>,
    D1: Dimension,
    S2: Data<Elem = f64>,
    D2: Dimension,
{
    let reference = validate::point3("ref", reference)?;
    let points = validate::point_set("points", points)?;
    let c = validate::sound_speed(c)?;
    debug!("receive_delay: {} points from {}", points.nrows(), reference);

    let mut tau = Array1::<f64>::zeros(points.nrows());
    receive_delay_into(c, reference, points, tau.view_mut());
    Ok(tau)
}

/// Fills `out` with the one-way delays from `reference`; inputs are already validated.
pub(crate) fn receive_delay_into(
    c: f64,
    reference: Point3,
    points: ArrayView2<'_, f64>,
    out: ArrayViewMut1<'_, f64>,
) {
    Zip::from(out)
        .and(points.rows())
        .for_each(|t, p| *t = row_point(p).distance(&reference) / c);
}

/// Time from `t = 0` until a steered plane wave reaches each point, using the
/// canonical [`PlaneWaveNormal::Spherical`] direction.
///
/// `tref` is the firing time of `reference`: at `t = tref` the wavefront has
/// already travelled `c * tref` from it. Points behind the wavefront at that
/// instant get negative delays.
pub fn plane_wave_delay<S1, D1, S2, D2>(
    c: f64,
    tref: f64,
    steer: SteeringAngles,
    reference: &ArrayBase<S1, D1>,
    points: &ArrayBase<S2, D2>,
) -> Result<Array1<f64>>
where
    S1: Data<Elem = f64>,
    D1: Dimension,
    S2: Data<Elem = f64>,
    D2: Dimension,
{
    plane_wave_delay_with(PlaneWaveNormal::Spherical, c, tref, steer, reference, points)
}

/// [`plane_wave_delay`] with an explicit propagation-direction convention.
pub fn plane_wave_delay_with<S1, D1, S2, D2>(
    normal: PlaneWaveNormal,
    c: f64,
    tref: f64,
    steer: SteeringAngles,
    reference: &ArrayBase<S1, D1>,
    points: &ArrayBase<S2, D2>,
) -> Result<Array1<f64>>
where
    S1: Data<Elem = f64>,
    D1: Dimension,
    S2: Data<Elem = f64>,
    D2: Dimension,
{
    let reference = validate::point3("ref", reference)?;
    let points = validate::point_set("points", points)?;
    let c = validate::sound_speed(c)?;
    let tref = validate::finite("tref", tref)?;
    validate::finite("theta", steer.theta)?;
    validate::finite("phi", steer.phi)?;
    let direction = normal.direction(steer).ok_or_else(|| {
        Error::domain(format!(
            "plane-wave normal ({}) vanishes for theta={}, phi={}",
            normal, steer.theta, steer.phi
        ))
    })?;
    debug!(
        "plane_wave_delay: {} points, direction {} ({})",
        points.nrows(),
        direction,
        normal
    );

    let origin = reference - Point3::new(0.0, 0.0, c * tref);
    Ok(project_delays(c, origin, direction, points))
}

/// Time from `t = 0` until a focused transmit wavefront reaches each point.
///
/// Only the straight-ahead wavefront is modeled: the propagation direction is
/// fixed to `(0, 0, 1)` whatever the lateral position of `focal`, which is
/// shape-checked but otherwise unused.
pub fn focused_delay<S1, D1, S2, D2, S3, D3>(
    c: f64,
    tref: f64,
    focal: &ArrayBase<S1, D1>,
    reference: &ArrayBase<S2, D2>,
    points: &ArrayBase<S3, D3>,
) -> Result<Array1<f64>>
where
    S1: Data<Elem = f64>,
    D1: Dimension,
    S2: Data<Elem = f64>,
    D2: Dimension,
    S3: Data<Elem = f64>,
    D3: Dimension,
{
    validate::point3("focal", focal)?;
    let reference = validate::point3("ref", reference)?;
    let points = validate::point_set("points", points)?;
    let c = validate::sound_speed(c)?;
    let tref = validate::finite("tref", tref)?;
    debug!("focused_delay: {} points from {}", points.nrows(), reference);

    let origin = reference + Point3::new(0.0, 0.0, c * tref);
    Ok(project_delays(c, origin, Point3::AXIAL, points))
}

// Signed distance from the wavefront through `origin` along `direction`, over c.
fn project_delays(c: f64, origin: Point3, direction: Point3, points: ArrayView2<'_, f64>) -> Array1<f64> {
    points
        .rows()
        .into_iter()
        .map(|p| (row_point(p) - origin).dot(&direction) / c)
        .collect()
}
