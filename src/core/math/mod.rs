mod vec2;

pub use vec2::{cross_sv, Vec2};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perp_is_counter_clockwise() {
        let v = Vec2::new(1.0, 0.0).perp();
        assert_eq!(v, Vec2::new(0.0, 1.0));
        assert!((Vec2::new(1.0, 0.0).cross(v) - 1.0).abs() < 1e-6);
    }
}
