use crate::geometry::Point2d;
use serde::Serialize;
use std::f64::consts::PI;

/// Guards `theta_index(theta_at(i)) == i` against the last-ulp error of
/// `i * π / (n - 1) / π * (n - 1)`.
const THETA_INDEX_EPS: f64 = 1e-9;

/// Mapping between continuous `(rho, theta)` and accumulator bucket indices.
///
/// Both axes share the same odd bucket count derived from the image
/// diagonal. Rho buckets are unit wide and centred on zero; theta buckets
/// cover `[0, π]` inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Discretization {
    pub num_buckets: usize,
    pub theta_step: f64,
    pub min_rho: f64,
}

impl Discretization {
    pub fn from_image_size(width: usize, height: usize) -> Self {
        let diag = ((width * width + height * height) as f64).sqrt();
        let mut n = 2 * (0.5 * diag).ceil() as usize + 4;
        if n % 2 == 0 {
            n += 1;
        }
        Self {
            num_buckets: n,
            theta_step: PI / (n - 1) as f64,
            min_rho: (1.0 - n as f64) / 2.0,
        }
    }

    /// Bucket holding `rho`, `None` when it falls outside the grid.
    pub fn rho_index(&self, rho: f64) -> Option<usize> {
        let offset = rho - self.min_rho;
        if offset >= 0.0 && offset < self.num_buckets as f64 {
            Some(offset.floor() as usize)
        } else {
            None
        }
    }

    /// Bucket holding `theta` after folding it into `[0, π)`.
    pub fn theta_index(&self, theta: f64) -> usize {
        let mut angle = theta.rem_euclid(2.0 * PI);
        if angle >= PI {
            angle -= PI;
        }
        let scaled = angle / PI * (self.num_buckets - 1) as f64;
        ((scaled + THETA_INDEX_EPS).floor() as usize).min(self.num_buckets - 1)
    }

    #[inline]
    pub fn rho_at(&self, index: usize) -> f64 {
        index as f64 + self.min_rho
    }

    #[inline]
    pub fn theta_at(&self, index: usize) -> f64 {
        index as f64 * self.theta_step
    }

    /// Lower-left corner of bucket `(rho_index, theta_index)` as `(rho, theta)`.
    pub fn index_to_rho_theta(&self, rho_index: usize, theta_index: usize) -> Point2d {
        Point2d::rho_theta(self.rho_at(rho_index), self.theta_at(theta_index))
    }

    /// Largest representable rho.
    pub fn max_rho(&self) -> f64 {
        self.min_rho + (self.num_buckets - 1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bucket_count_is_odd_and_covers_diagonal() {
        let d = Discretization::from_image_size(50, 50);
        assert_eq!(d.num_buckets, 77);
        assert_eq!(d.min_rho, -38.0);
        assert_eq!(d.max_rho(), 38.0);
        for (w, h) in [(3, 3), (4, 7), (640, 480), (101, 1)] {
            let d = Discretization::from_image_size(w, h);
            assert_eq!(d.num_buckets % 2, 1);
            let half_diag = ((w * w + h * h) as f64).sqrt() / 2.0;
            assert!(d.max_rho() >= half_diag);
            assert!(-d.min_rho >= half_diag);
        }
    }

    #[test]
    fn rho_index_rejects_out_of_range() {
        let d = Discretization::from_image_size(50, 50);
        assert_eq!(d.rho_index(-14.5), Some(23));
        assert_eq!(d.rho_index(-38.0), Some(0));
        assert_eq!(d.rho_index(38.9), Some(76));
        assert_eq!(d.rho_index(39.0), None);
        assert_eq!(d.rho_index(-38.01), None);
    }

    #[test]
    fn theta_index_folds_angles() {
        let d = Discretization::from_image_size(50, 50);
        assert_eq!(d.theta_index(PI / 2.0), 38);
        assert_eq!(d.theta_index(PI / 2.0 + PI), 38);
        assert_eq!(d.theta_index(PI / 2.0 - 2.0 * PI), 38);
        assert_eq!(d.theta_index(0.0), 0);
        assert_eq!(d.theta_index(PI), 0);
    }

    #[test]
    fn indices_survive_conversion() {
        let d = Discretization::from_image_size(37, 23);
        for i in 0..d.num_buckets {
            assert_eq!(d.rho_index(d.rho_at(i)), Some(i));
            if i + 1 < d.num_buckets {
                assert_eq!(d.theta_index(d.theta_at(i)), i, "theta bucket {i}");
            }
        }
        let p = d.index_to_rho_theta(3, 2);
        assert_relative_eq!(p.rho(), 3.0 + d.min_rho);
        assert_relative_eq!(p.theta(), 2.0 * d.theta_step);
    }
}
