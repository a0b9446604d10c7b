//! High-level, caller-side helpers built on the core engines: transmit delay
//! dispatch from a `TransmitParams` preset, element tabs with inactive elements
//! zeroed, and full element-by-point receive tables. Prefer these entrypoints
//! when assembling delay-and-sum reconstructions.
use ndarray::{Array1, Array2, ArrayBase, Data, Dimension, Zip, arr1};
use tracing::{debug, warn};

use crate::core::mask::{FieldAperture, element_delays_and_mask};
use crate::core::params::{TransmitMode, TransmitParams};
use crate::core::tof::{focused_delay, plane_wave_delay_with, receive_delay_into};
use crate::core::validate::{self, row_point};
use crate::error::{Error, Result};
use crate::types::ApertureKind;

/// Element delay tabs for one focus, ready to be added to receive delays.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementTabs {
    /// Firing delay per element [s]; zero for inactive elements
    pub delays: Array1<f64>,
    /// Active elements under the f-number rule
    pub mask: Array1<bool>,
}

impl ElementTabs {
    pub fn active_count(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    pub fn max_delay(&self) -> f64 {
        self.delays.iter().copied().fold(0.0, f64::max)
    }
}

/// Transmit delays for `points`, dispatched on the excitation in `params`.
pub fn transmit_delay<S1, D1, S2, D2>(
    params: &TransmitParams,
    tref: f64,
    reference: &ArrayBase<S1, D1>,
    points: &ArrayBase<S2, D2>,
) -> Result<Array1<f64>>
where
    S1: Data<Elem = f64>,
    D1: Dimension,
    S2: Data<Elem = f64>,
    D2: Dimension,
{
    params.validate()?;
    match params.mode {
        TransmitMode::Parametric { steer, focus: None } => {
            debug!("plane-wave transmit, steer={:?}, normal={}", steer, params.normal);
            plane_wave_delay_with(params.normal, params.c, tref, steer, reference, points)
        }
        TransmitMode::Parametric {
            focus: Some(focus), ..
        } => {
            debug!("focused transmit at {}", focus);
            focused_delay(params.c, tref, &arr1(&focus.to_array()), reference, points)
        }
    }
}

/// Per-element delay tabs with inactive elements set to zero.
pub fn element_tabs<S1, D1, S2, D2>(
    c: f64,
    fnum: f64,
    focus: &ArrayBase<S1, D1>,
    eles: &ArrayBase<S2, D2>,
) -> Result<ElementTabs>
where
    S1: Data<Elem = f64>,
    D1: Dimension,
    S2: Data<Elem = f64>,
    D2: Dimension,
{
    let (mut delays, mask) = element_delays_and_mask(c, fnum, focus, eles)?;
    Zip::from(&mut delays).and(&mask).for_each(|d, &active| {
        if !active {
            *d = 0.0;
        }
    });
    let tabs = ElementTabs { delays, mask };
    debug!(
        "element tabs: {}/{} active, max delay {:.3e} s",
        tabs.active_count(),
        tabs.mask.len(),
        tabs.max_delay()
    );
    Ok(tabs)
}

/// Element tabs for the focused transmit described by `params`, using its
/// sound speed and f-number.
///
/// A plane-wave preset has no focus to build tabs for and fails with
/// [`Error::Config`].
pub fn transmit_tabs<S, D>(params: &TransmitParams, eles: &ArrayBase<S, D>) -> Result<ElementTabs>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    params.validate()?;
    let focus = params
        .mode
        .focus()
        .ok_or_else(|| Error::Config("element tabs need a focused transmit".to_string()))?;
    element_tabs(params.c, params.fnum, &arr1(&focus.to_array()), eles)
}

/// One-way delays from every element to every point, shape `(n_ele, n_points)`.
///
/// Rows are filled in parallel; each row equals
/// [`receive_delay`](crate::core::tof::receive_delay) for that element.
pub fn receive_delay_table<S1, D1, S2, D2>(
    c: f64,
    eles: &ArrayBase<S1, D1>,
    points: &ArrayBase<S2, D2>,
) -> Result<Array2<f64>>
where
    S1: Data<Elem = f64>,
    D1: Dimension,
    S2: Data<Elem = f64>,
    D2: Dimension,
{
    let eles = validate::point_set("eles", eles)?;
    let points = validate::point_set("points", points)?;
    let c = validate::sound_speed(c)?;
    debug!(
        "receive delay table: {} elements x {} points",
        eles.nrows(),
        points.nrows()
    );

    let mut table = Array2::<f64>::zeros((eles.nrows(), points.nrows()));
    Zip::from(table.rows_mut())
        .and(eles.rows())
        .par_for_each(|row, ele| receive_delay_into(c, row_point(ele), points, row));
    Ok(table)
}

/// Field masks with each element in turn as the aperture reference, all
/// focused at `focus`; shape `(n_ele, n_points)`.
pub fn field_mask_table<S1, D1, S2, D2, S3, D3>(
    fnum: f64,
    eles: &ArrayBase<S1, D1>,
    focus: &ArrayBase<S2, D2>,
    points: &ArrayBase<S3, D3>,
    kind: ApertureKind,
) -> Result<Array2<bool>>
where
    S1: Data<Elem = f64>,
    D1: Dimension,
    S2: Data<Elem = f64>,
    D2: Dimension,
    S3: Data<Elem = f64>,
    D3: Dimension,
{
    let focus = validate::point3("focus", focus)?;
    let eles = validate::point_set("eles", eles)?;
    let points = validate::point_set("points", points)?;
    let fnum = validate::fnumber(fnum)?;
    let apertures = eles
        .rows()
        .into_iter()
        .map(|e| FieldAperture::new(fnum, row_point(e), focus, kind))
        .collect::<Result<Vec<_>>>()?;
    let behind = apertures.iter().filter(|a| a.is_behind()).count();
    if behind > 0 {
        warn!("focus {} is behind {} of {} elements", focus, behind, apertures.len());
    }
    debug!(
        "field mask table: {} elements x {} points, {} aperture",
        eles.nrows(),
        points.nrows(),
        kind
    );

    let mut table = Array2::from_elem((eles.nrows(), points.nrows()), false);
    let apertures = Array1::from(apertures);
    Zip::from(table.rows_mut())
        .and(&apertures)
        .par_for_each(|row, aperture| aperture.mask_into(points, row));
    Ok(table)
}
