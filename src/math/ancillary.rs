// Conformal latitude helpers, expressed in terms of τ = tan 𝜙.
// See Karney (2011), section 2.

/// σ(τ) = sinh(e · artanh(e · τ / √(1 + τ²))), i.e. sinh(e · artanh(e · sin 𝜙))
pub fn sigma(tau: f64, e: f64) -> f64 {
    let sinphi = tau / (1. + tau * tau).sqrt();
    (e * (e * sinphi).atanh()).sinh()
}

/// The tangent of the conformal latitude, τ' = tan 𝜒, from τ = tan 𝜙:
/// τ' = τ √(1 + σ²) − σ √(1 + τ²)
pub fn tau_conformal(tau: f64, e: f64) -> f64 {
    let sig = sigma(tau, e);
    tau * (1. + sig * sig).sqrt() - sig * (1. + tau * tau).sqrt()
}

/// The derivative dτ'/dτ of [tau_conformal], used for inverting it by Newton's method,
/// following [Deakin et al. (2012)](crate::Bibliography::Dea12).
pub fn tau_conformal_derivative(tau: f64, e: f64) -> f64 {
    let sig = sigma(tau, e);
    let e2m = 1. - e * e;
    let tau1 = (1. + tau * tau).sqrt();
    ((1. + sig * sig).sqrt() * tau1 - sig * tau) * (e2m * tau1) / (1. + e2m * tau * tau)
}

/// Round to a fixed number of decimals, halfway cases away from zero
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale
}

// ----- Tests ---------------------------------------------------------------------
