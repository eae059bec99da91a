use cubed_geom::Vec3;
use proptest::prelude::*;

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec3_add_sub() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 5.0, -6.0);
    let c = a + b;
    assert!(vec3_approx_eq(c, Vec3::new(-3.0, 7.0, -3.0), 1e-6));
    assert!(vec3_approx_eq(c - a, b, 1e-6));
}

#[test]
fn vec3_add_assign_and_scale() {
    let mut v = Vec3::ZERO;
    v += Vec3::UNIT_X * 2.5;
    assert!(vec3_approx_eq(v, Vec3::new(2.5, 0.0, 0.0), 1e-6));
    assert!(approx_eq(Vec3::new(3.0, 4.0, 0.0).length(), 5.0, 1e-6));
}

#[test]
fn vec3_floor_goes_toward_negative_infinity() {
    let v = Vec3::new(-0.5, 1.5, -16.0).floor();
    assert_eq!(v, Vec3::new(-1.0, 1.0, -16.0));
    assert_eq!(Vec3::from([0.25, -3.75, 7.0]).floor(), Vec3::new(0.0, -4.0, 7.0));
}

proptest! {
    // floor never rounds up and stays within one unit
    #[test]
    fn floor_is_within_one(x in -1.0e5f32..1.0e5, y in -1.0e5f32..1.0e5, z in -1.0e5f32..1.0e5) {
        let v = Vec3::new(x, y, z);
        let f = v.floor();
        prop_assert!(f.x <= v.x && v.x - f.x < 1.0);
        prop_assert!(f.y <= v.y && v.y - f.y < 1.0);
        prop_assert!(f.z <= v.z && v.z - f.z < 1.0);
    }
}
