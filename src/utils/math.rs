pub const ONE_PER_SQRT_2PI: f64 = 0.398_942_280_401_432_7;
pub const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_7;

/// Standard normal CDF evaluated at `a`.
pub fn normal_probability(a: f64) -> f64 {
    0.5 * (1.0 + libm::erf(a / (2.0f64).sqrt()))
}

/// `ln(sum(exp(xs)))` without overflow or underflow of the intermediate terms.
///
/// Returns `f64::NEG_INFINITY` when every term is `-inf` (or `xs` is empty)
/// and `NaN` when any term is `NaN`.
pub fn logsumexp(xs: &[f64]) -> f64 {
    if xs.iter().any(|x| x.is_nan()) {
        return f64::NAN;
    }
    let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return max;
    }
    let sum: f64 = xs.iter().map(|&x| (x - max).exp()).sum();
    max + sum.ln()
}

/// Sign-preserving magnitude floor: values whose magnitude is below `floor`
/// are pushed out to `±floor`. An exact zero stays zero.
#[inline]
pub fn signed_floor(value: f64, floor: f64) -> f64 {
    if value.abs() < floor {
        if value == 0.0 { 0.0 } else { value.signum() * floor }
    } else {
        value
    }
}
