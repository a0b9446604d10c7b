// tests/engines.rs
//
// End-to-end checks of the public delay and mask API against hand-computed
// geometry. Run with: cargo test --test engines

use approx::assert_relative_eq;
use ndarray::{Array1, Array2, Array3, array};

use bmfrm::{
    ApertureKind, Error, PlaneWaveNormal, Point3, SteeringAngles, TransmitMode, TransmitParams,
    element_delays_and_mask, element_tabs, field_mask, focused_delay, linear_array,
    plane_wave_delay, plane_wave_delay_with, receive_delay, receive_delay_table, transmit_delay,
};

fn ref_and_points() -> (Array2<f64>, Array2<f64>) {
    let reference = Array2::zeros((1, 3));
    let points = array![
        [0.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [-1.0, -1.0, 0.0],
        [0.0, 0.0, 1.0]
    ];
    (reference, points)
}

#[test]
fn receive_delay_known_values() {
    let (reference, points) = ref_and_points();
    let tau = receive_delay(2.0, &reference, &points).unwrap();
    let known = array![0.0, 2f64.sqrt() / 2.0, 2f64.sqrt() / 2.0, 0.5];
    assert_eq!(tau.dim(), 4);
    for (t, k) in tau.iter().zip(known.iter()) {
        assert_relative_eq!(*t, *k, epsilon = 1e-12);
    }
}

#[test]
fn plane_wave_unsteered_known_values() {
    let (reference, points) = ref_and_points();
    let c = 2.0;
    let known = [1.0 / c, 1.0 / c, 1.0 / c, 2.0 / c];
    for normal in [PlaneWaveNormal::Spherical, PlaneWaveNormal::SummedCosine] {
        let tau =
            plane_wave_delay_with(normal, c, 0.5, SteeringAngles::default(), &reference, &points)
                .unwrap();
        for (t, k) in tau.iter().zip(known) {
            assert_relative_eq!(*t, k, epsilon = 1e-12);
        }
    }
}

#[test]
fn plane_wave_conventions_diverge_when_steered_in_both_planes() {
    let (reference, points) = ref_and_points();
    let steer = SteeringAngles::new(0.3, 0.3);
    let spherical =
        plane_wave_delay_with(PlaneWaveNormal::Spherical, 1.0, 0.0, steer, &reference, &points)
            .unwrap();
    let summed =
        plane_wave_delay_with(PlaneWaveNormal::SummedCosine, 1.0, 0.0, steer, &reference, &points)
            .unwrap();
    assert_eq!(spherical, plane_wave_delay(1.0, 0.0, steer, &reference, &points).unwrap());
    assert!((spherical[3] - summed[3]).abs() > 1e-3);
}

#[test]
fn focused_delay_is_axial_distance_minus_reference_travel() {
    let reference = array![1e-3, 0.0, 0.0];
    let points = array![[0.0, 0.0, 10e-3], [5e-3, 0.0, 20e-3]];
    let focal = array![[2e-3, 0.0, 30e-3]];
    let c = 1540.0;
    let tref = 2e-6;
    let tau = focused_delay(c, tref, &focal, &reference, &points).unwrap();
    assert_relative_eq!(tau[0], (10e-3 - c * tref) / c, epsilon = 1e-15);
    assert_relative_eq!(tau[1], (20e-3 - c * tref) / c, epsilon = 1e-15);
}

#[test]
fn shape_validation_rejects_before_computing() {
    let (reference, points) = ref_and_points();
    let short = array![0.0, 0.0];
    let cube = Array3::<f64>::zeros((1, 1, 3));
    let flat = array![0.0, 0.0, 1.0];
    let wide = Array2::<f64>::zeros((4, 4));
    let steer = SteeringAngles::default();

    for r in [
        receive_delay(1.0, &short, &points),
        plane_wave_delay(1.0, 0.0, steer, &short, &points),
        focused_delay(1.0, 0.0, &flat, &short, &points),
    ] {
        assert!(matches!(r, Err(Error::Shape { arg: "ref", .. })));
    }
    assert!(matches!(
        receive_delay(1.0, &cube, &points),
        Err(Error::Shape { arg: "ref", .. })
    ));
    for r in [
        receive_delay(1.0, &reference, &flat),
        receive_delay(1.0, &reference, &wide),
        plane_wave_delay(1.0, 0.0, steer, &reference, &flat),
    ] {
        assert!(matches!(r, Err(Error::Shape { arg: "points", .. })));
    }
    assert!(matches!(
        field_mask(2.0, &reference, &flat, &wide, ApertureKind::Dynamic),
        Err(Error::Shape { arg: "points", .. })
    ));
    assert!(matches!(
        element_delays_and_mask(1540.0, 2.0, &short, &points),
        Err(Error::Shape { arg: "focus", .. })
    ));
    assert!(matches!(
        element_delays_and_mask(1540.0, 2.0, &flat, &flat),
        Err(Error::Shape { arg: "eles", .. })
    ));
}

#[test]
fn linear_array_tabs_match_example_setup() {
    // 128 elements, 0.298 mm pitch, transmit focus under element 31 at 28 mm
    let nele = 128;
    let pitch = 0.298e-3;
    let eles = linear_array(nele, pitch).unwrap();
    let x = pitch * (31.0 - (nele as f64 - 1.0) / 2.0);

    let tx = element_tabs(1540.0, 2.0, &array![x, 0.0, 28e-3], &eles).unwrap();
    let rx = element_tabs(1540.0, 2.0, &array![x, 0.0, 30e-3], &eles).unwrap();

    // deeper receive focus opens a wider aperture
    assert!(rx.active_count() > tx.active_count());
    for i in 0..nele {
        if tx.mask[i] {
            assert!(rx.mask[i]);
        }
        if !tx.mask[i] {
            assert_eq!(tx.delays[i], 0.0);
        }
    }
    assert!(tx.max_delay() > 0.0);
    assert!(tx.max_delay() < 28e-3 / 1540.0);
}

#[test]
fn element_tabs_report_empty_aperture() {
    let eles = array![[10e-3, 0.0, 0.0], [11e-3, 0.0, 0.0]];
    let err = element_tabs(1540.0, 4.0, &array![0.0, 0.0, 20e-3], &eles).unwrap_err();
    assert!(matches!(err, Error::EmptyAperture { .. }));
    assert!(err.to_string().contains("f-number 4"));
}

#[test]
fn field_mask_fixed_versus_dynamic() {
    let reference = array![0.0, 0.0, 0.0];
    let focus = array![0.0, 0.0, 20e-3];
    // a line of points 2 mm off axis at increasing depth
    let points = Array2::from_shape_fn((8, 3), |(i, j)| match j {
        0 => 2e-3,
        2 => (i as f64 + 1.0) * 5e-3,
        _ => 0.0,
    });
    let dynamic = field_mask(2.0, &reference, &focus, &points, ApertureKind::Dynamic).unwrap();
    let fixed = field_mask(2.0, &reference, &focus, &points, ApertureKind::Fixed).unwrap();

    // fixed: 2*2mm <= 10mm everywhere
    assert!(fixed.iter().all(|&m| m));
    // dynamic: 2*2mm <= z/2 once z >= 8mm
    assert_eq!(
        dynamic.to_vec(),
        vec![false, true, true, true, true, true, true, true]
    );
}

#[test]
fn transmit_delay_uses_preset() {
    let eles = linear_array(4, 1e-3).unwrap();
    let points = eles.clone() + &array![[0.0, 0.0, 5e-3]];
    let params = TransmitParams::new(
        TransmitMode::focused(SteeringAngles::default(), Point3::new(0.0, 0.0, 30e-3)),
        1540.0,
        2.0,
        PlaneWaveNormal::Spherical,
    )
    .unwrap();
    let tau = transmit_delay(&params, 0.0, &Array1::<f64>::zeros(3), &points).unwrap();
    for t in tau.iter() {
        assert_relative_eq!(*t, 5e-3 / 1540.0, epsilon = 1e-15);
    }
}

#[test]
fn receive_table_has_one_row_per_element() {
    let eles = linear_array(3, 1.0).unwrap();
    let points = array![[0.0, 0.0, 1.0], [1.0, 0.0, 0.0]];
    let table = receive_delay_table(1.0, &eles, &points).unwrap();
    assert_eq!(table.dim(), (3, 2));
    assert_relative_eq!(table[[0, 0]], 2f64.sqrt());
    assert_relative_eq!(table[[1, 0]], 1.0);
    assert_relative_eq!(table[[2, 1]], 0.0);
    assert_relative_eq!(table[[0, 1]], 2.0);
}
