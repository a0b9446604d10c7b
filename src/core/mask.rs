//! Aperture mask engine: f-number based apodization of field points and
//! per-element transmit delay tabs.
use ndarray::{Array1, ArrayBase, ArrayView2, ArrayViewMut1, Data, Dimension, Zip};
use tracing::{debug, warn};

use crate::core::validate::{self, row_point};
use crate::error::{Error, Result};
use crate::types::{ApertureKind, Point3};

/// Precomputed geometry of a ref→focus apodization cone.
#[derive(Copy, Clone, Debug)]
pub(crate) struct FieldAperture {
    reference: Point3,
    axis: Point3,
    fnum: f64,
    focal_depth: f64,
    kind: ApertureKind,
}

impl FieldAperture {
    pub(crate) fn new(fnum: f64, reference: Point3, focus: Point3, kind: ApertureKind) -> Result<Self> {
        let beam = focus - reference;
        let axis = beam.normalized().ok_or_else(|| {
            Error::domain(format!(
                "focus {} coincides with reference {}",
                focus, reference
            ))
        })?;
        if axis.z == 0.0 {
            return Err(Error::domain(format!(
                "focus {} lies in the array plane of reference {}",
                focus, reference
            )));
        }
        Ok(Self {
            reference,
            axis,
            fnum,
            focal_depth: beam.z,
            kind,
        })
    }

    /// Whether the focus lies behind the reference (negative depth).
    pub(crate) fn is_behind(&self) -> bool {
        self.axis.z < 0.0
    }

    /// Whether `point` falls inside the aperture.
    pub(crate) fn includes(&self, point: Point3) -> bool {
        let local = point - self.reference;
        // point on the ref→focus ray at the same depth as `local`
        let on_axis = self.axis * (local.z / self.axis.z);
        let radius = (local - on_axis).norm();
        let depth = match self.kind {
            ApertureKind::Dynamic => local.z,
            ApertureKind::Fixed => self.focal_depth,
        };
        2.0 * radius <= depth / self.fnum
    }

    pub(crate) fn mask_into(&self, points: ArrayView2<'_, f64>, out: ArrayViewMut1<'_, bool>) {
        Zip::from(out)
            .and(points.rows())
            .for_each(|m, p| *m = self.includes(row_point(p)));
    }
}

/// Apodization mask over reconstruction points for a transmit/receive element
/// at `reference` focused at `focus`.
///
/// A point is kept when twice its distance from the ref→focus axis (measured
/// at the point's own depth) does not exceed `depth / fnum`, where `depth` is
/// the point's depth for [`ApertureKind::Dynamic`] and the focal depth for
/// [`ApertureKind::Fixed`]. Depths are relative to `reference`.
///
/// The focus is expected in front of the array; a focus in the array plane
/// has no usable axis and fails with [`Error::Domain`].
pub fn field_mask<S1, D1, S2, D2, S3, D3>(
    fnum: f64,
    reference: &ArrayBase<S1, D1>,
    focus: &ArrayBase<S2, D2>,
    points: &ArrayBase<S3, D3>,
    kind: ApertureKind,
) -> Result<Array1<bool>>
where
    S1: Data<Elem = f64>,
    D1: Dimension,
    S2: Data<Elem = f64>,
    D2: Dimension,
    S3: Data<Elem = f64>,
    D3: Dimension,
{
    let focus = validate::point3("focus", focus)?;
    let reference = validate::point3("ref", reference)?;
    let points = validate::point_set("points", points)?;
    let fnum = validate::fnumber(fnum)?;
    let aperture = FieldAperture::new(fnum, reference, focus, kind)?;
    if aperture.is_behind() {
        warn!("focus {} is behind reference {}", focus, reference);
    }
    debug!(
        "field_mask: {} points, fnum={}, {} aperture",
        points.nrows(),
        fnum,
        kind
    );

    let mut mask = Array1::from_elem(points.nrows(), false);
    aperture.mask_into(points, mask.view_mut());
    Ok(mask)
}

/// Per-element transmit delay tabs for a focus, with the f-number mask of
/// active elements.
///
/// An element is active when twice its lateral distance to the focus is at
/// most `focus.z / fnum`. Delays are `(max_active_distance - distance) / c`,
/// so the farthest active element fires at zero and every other active element
/// waits. Inactive elements get a value from the same formula; zeroing them is
/// left to the caller.
///
/// Steering is not modeled: the aperture is centered on the focus projected
/// onto `z = 0`.
pub fn element_delays_and_mask<S1, D1, S2, D2>(
    c: f64,
    fnum: f64,
    focus: &ArrayBase<S1, D1>,
    eles: &ArrayBase<S2, D2>,
) -> Result<(Array1<f64>, Array1<bool>)>
where
    S1: Data<Elem = f64>,
    D1: Dimension,
    S2: Data<Elem = f64>,
    D2: Dimension,
{
    let focus = validate::point3("focus", focus)?;
    let eles = validate::point_set("eles", eles)?;
    let c = validate::sound_speed(c)?;
    let fnum = validate::fnumber(fnum)?;

    let center = focus.lateral();
    let limit = focus.z / fnum;
    let mask: Array1<bool> = eles
        .rows()
        .into_iter()
        .map(|e| 2.0 * row_point(e).lateral().distance(&center) <= limit)
        .collect();
    let dist: Array1<f64> = eles
        .rows()
        .into_iter()
        .map(|e| row_point(e).distance(&focus))
        .collect();

    let longest = dist
        .iter()
        .zip(mask.iter())
        .filter(|&(_, &active)| active)
        .map(|(&d, _)| d)
        .reduce(f64::max)
        .ok_or(Error::EmptyAperture {
            fnum,
            depth: focus.z,
        })?;
    debug!(
        "element_delays_and_mask: {}/{} active, longest path {}",
        mask.iter().filter(|&&m| m).count(),
        eles.nrows(),
        longest
    );

    let delays = dist.mapv(|d| (longest - d) / c);
    Ok((delays, mask))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::linear_array;
    use approx::assert_relative_eq;
    use ndarray::{Array2, array};

    fn column_of_points() -> Array2<f64> {
        array![
            [0.0, 0.0, 10.0],
            [2.0, 0.0, 10.0],
            [3.0, 0.0, 10.0],
            [1.0, 0.0, 4.0],
            [0.0, 1.0, 20.0],
            [6.0, 0.0, 20.0]
        ]
    }

    #[test]
    fn dynamic_mask_grows_with_depth() {
        let reference = array![0.0, 0.0, 0.0];
        let focus = array![0.0, 0.0, 10.0];
        let mask = field_mask(2.0, &reference, &focus, &column_of_points(), ApertureKind::Dynamic)
            .unwrap();
        // half-width limit is z / 4
        assert_eq!(mask.to_vec(), vec![true, true, false, true, true, false]);
    }

    #[test]
    fn fixed_mask_uses_focal_depth() {
        let reference = array![0.0, 0.0, 0.0];
        let focus = array![0.0, 0.0, 10.0];
        let mask = field_mask(2.0, &reference, &focus, &column_of_points(), ApertureKind::Fixed)
            .unwrap();
        // half-width limit is 2.5 everywhere
        assert_eq!(mask.to_vec(), vec![true, true, false, true, true, false]);

        let deep = array![[4.0, 0.0, 40.0]];
        let dynamic = field_mask(2.0, &reference, &focus, &deep, ApertureKind::Dynamic).unwrap();
        let fixed = field_mask(2.0, &reference, &focus, &deep, ApertureKind::Fixed).unwrap();
        assert!(dynamic[0]);
        assert!(!fixed[0]);
    }

    #[test]
    fn mask_follows_tilted_axis() {
        let reference = array![0.0, 0.0, 0.0];
        let focus = array![10.0, 0.0, 10.0];
        let points = array![[5.0, 0.0, 5.0], [0.0, 0.0, 5.0], [10.0, 0.0, 10.0]];
        let mask = field_mask(1.0, &reference, &focus, &points, ApertureKind::Dynamic).unwrap();
        assert_eq!(mask.to_vec(), vec![true, false, true]);
    }

    #[test]
    fn mask_is_relative_to_reference() {
        let reference = array![1.0, 0.0, 1.0];
        let focus = array![1.0, 0.0, 11.0];
        let points = array![[1.0, 0.0, 1.0], [3.0, 0.0, 11.0], [1.0, 0.0, 0.0]];
        let mask = field_mask(2.0, &reference, &focus, &points, ApertureKind::Dynamic).unwrap();
        assert_eq!(mask.to_vec(), vec![true, true, false]);
    }

    #[test]
    fn degenerate_focus_is_a_domain_error() {
        let reference = array![0.0, 0.0, 0.0];
        let points = column_of_points();
        let lateral = array![1.0, 0.0, 0.0];
        assert!(matches!(
            field_mask(2.0, &reference, &lateral, &points, ApertureKind::Dynamic),
            Err(Error::Domain { .. })
        ));
        assert!(matches!(
            field_mask(2.0, &reference, &reference, &points, ApertureKind::Fixed),
            Err(Error::Domain { .. })
        ));
    }

    #[test]
    fn focus_behind_reference_is_flagged_not_rejected() {
        let reference = Point3::new(0.0, 0.0, 5.0);
        let ahead = FieldAperture::new(2.0, reference, Point3::new(0.0, 0.0, 10.0), ApertureKind::Dynamic)
            .unwrap();
        let behind = FieldAperture::new(2.0, reference, Point3::new(0.0, 0.0, 1.0), ApertureKind::Dynamic)
            .unwrap();
        assert!(!ahead.is_behind());
        assert!(behind.is_behind());

        let mask = field_mask(
            2.0,
            &array![0.0, 0.0, 5.0],
            &array![0.0, 0.0, 1.0],
            &column_of_points(),
            ApertureKind::Dynamic,
        )
        .unwrap();
        assert_eq!(mask.len(), 6);
    }

    #[test]
    fn field_mask_validates_shapes_first() {
        let reference = array![0.0, 0.0, 0.0];
        let focus = array![0.0, 0.0, 1.0];
        let bad = array![0.0, 1.0];
        assert!(matches!(
            field_mask(2.0, &reference, &bad, &column_of_points(), ApertureKind::Dynamic),
            Err(Error::Shape { arg: "focus", .. })
        ));
        assert!(matches!(
            field_mask(2.0, &bad, &focus, &column_of_points(), ApertureKind::Dynamic),
            Err(Error::Shape { arg: "ref", .. })
        ));
        assert!(matches!(
            field_mask(2.0, &reference, &focus, &focus, ApertureKind::Dynamic),
            Err(Error::Shape { arg: "points", .. })
        ));
        assert!(matches!(
            field_mask(0.0, &reference, &focus, &column_of_points(), ApertureKind::Dynamic),
            Err(Error::InvalidArgument { arg: "fnum", .. })
        ));
    }

    #[test]
    fn element_tabs_zero_at_longest_path() {
        let eles = linear_array(128, 0.298e-3).unwrap();
        let x = 0.298e-3 * (31.0 - 63.5);
        let focus = array![[x, 0.0, 28e-3]];
        let (dt, mask) = element_delays_and_mask(1540.0, 2.0, &focus, &eles).unwrap();

        assert_eq!(dt.len(), 128);
        assert_eq!(mask.len(), 128);
        let active: Vec<usize> = (0..128).filter(|&i| mask[i]).collect();
        // aperture width 14mm around element 31
        assert_eq!(active.len(), 47);
        assert!(mask[31]);
        assert!(!mask[0] && !mask[127]);

        // the active element farthest from the focus fires at zero
        let min_active = active.iter().map(|&i| dt[i]).fold(f64::INFINITY, f64::min);
        assert_eq!(min_active, 0.0);
        assert!(active.iter().all(|&i| dt[i] >= 0.0));
        // the element under the focus waits the longest
        let center_delay = dt[31];
        assert!(active.iter().all(|&i| dt[i] <= center_delay));
    }

    #[test]
    fn element_tabs_simple_geometry() {
        let eles = array![[-1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [5.0, 0.0, 0.0]];
        let focus = array![0.0, 0.0, 4.0];
        let (dt, mask) = element_delays_and_mask(2.0, 1.0, &focus, &eles).unwrap();
        assert_eq!(mask.to_vec(), vec![true, true, true, false]);
        let edge = 17f64.sqrt();
        assert_relative_eq!(dt[0], 0.0);
        assert_relative_eq!(dt[2], 0.0);
        assert_relative_eq!(dt[1], (edge - 4.0) / 2.0, epsilon = 1e-12);
        // inactive elements still carry the formula value
        assert_relative_eq!(dt[3], (edge - 41f64.sqrt()) / 2.0, epsilon = 1e-12);
        assert!(dt[3] < 0.0);
    }

    #[test]
    fn element_tabs_empty_aperture() {
        let eles = array![[5.0, 0.0, 0.0], [6.0, 0.0, 0.0]];
        let focus = array![0.0, 0.0, 4.0];
        assert!(matches!(
            element_delays_and_mask(1540.0, 2.0, &focus, &eles),
            Err(Error::EmptyAperture { .. })
        ));

        let none = Array2::<f64>::zeros((0, 3));
        assert!(matches!(
            element_delays_and_mask(1540.0, 2.0, &focus, &none),
            Err(Error::EmptyAperture { .. })
        ));
    }
}
