//! Slice kernels shared by the arithmetic, reduction and solver modules.

/// Inner product of two equal-length slices.
pub fn dot(lhs: &[f64], rhs: &[f64]) -> f64 {
    debug_assert_eq!(lhs.len(), rhs.len());
    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    {
        // SSE2 is part of the x86_64 baseline.
        unsafe { dot_simd_f64(lhs, rhs) }
    }
    #[cfg(not(all(feature = "simd", target_arch = "x86_64")))]
    {
        dot_scalar_f64(lhs, rhs)
    }
}

fn dot_scalar_f64(lhs: &[f64], rhs: &[f64]) -> f64 {
    lhs.iter().zip(rhs.iter()).map(|(a, b)| a * b).sum()
}

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
unsafe fn dot_simd_f64(lhs: &[f64], rhs: &[f64]) -> f64 {
    use std::arch::x86_64::*;

    let len = lhs.len().min(rhs.len());
    let mut i = 0usize;
    let mut acc = _mm_setzero_pd();

    while i + 2 <= len {
        let a = _mm_loadu_pd(lhs.as_ptr().add(i));
        let b = _mm_loadu_pd(rhs.as_ptr().add(i));
        acc = _mm_add_pd(acc, _mm_mul_pd(a, b));
        i += 2;
    }

    let mut lanes = [0f64; 2];
    _mm_storeu_pd(lanes.as_mut_ptr(), acc);
    let mut sum = lanes[0] + lanes[1];

    while i < len {
        sum += lhs[i] * rhs[i];
        i += 1;
    }

    sum
}

/// Left-to-right sum.
pub fn sum(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, v| acc + v)
}

pub fn mean(values: &[f64]) -> f64 {
    sum(values) / values.len() as f64
}

/// Sum of squared deviations from `center`.
pub fn sum_sq_dev(values: &[f64], center: f64) -> f64 {
    values.iter().fold(0.0, |acc, v| {
        let d = v - center;
        acc + d * d
    })
}
