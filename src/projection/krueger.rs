//! The Krüger n-series coefficients, 8th order, as given in Horner form by
//! [Karney (2011)](crate::Bibliography::Kar11) and
//! [Deakin et al. (2012)](crate::Bibliography::Dea12).
use crate::math::taylor::horner;
use crate::Ellipsoid;

/// Number of terms in each of the Krüger series
pub const SERIES_ORDER: usize = 8;

/// Each coefficient is nᵏ · P(n) / D, with the polynomial P given by its
/// integer coefficients in order of increasing power: (k, D, P)
type Polynomial = (i32, f64, &'static [f64]);

// Geographic (conformal) to TM: α₂ ... α₁₆
#[rustfmt::skip]
const ALPHA: [Polynomial; SERIES_ORDER] = [
    (1, 203_212_800., &[101_606_400., -135_475_200., 63_504_000., 46_287_360., -89_611_200., 42_422_016., 37_884_525., -75_900_428.]),
    (2, 174_182_400., &[47_174_400., -104_509_440., 67_374_720., 77_690_880., -178_508_970., 83_274_912., 148_003_883.]),
    (3, 319_334_400., &[81_164_160., -234_938_880., 178_924_680., 294_981_280., -738_126_169., 318_729_724.]),
    (4, 7_664_025_600., &[2_355_138_720., -8_165_836_800., 6_971_354_016., 14_967_552_000., -40_176_129_013.]),
    (5, 2_490_808_320., &[1_072_709_352., -4_266_773_472., 3_997_835_751., 10_421_654_396.]),
    (6, 58_118_860_800., &[38_652_967_262., -171_950_693_600., 175_214_326_799.]),
    (7, 12_454_041_600., &[13_700_311_101., -67_039_739_596.]),
    (8, 743_921_418_240., &[1_424_729_850_961.]),
];

// TM to geographic (conformal): β₂ ... β₁₆
#[rustfmt::skip]
const BETA: [Polynomial; SERIES_ORDER] = [
    (1, 270_950_400., &[-135_475_200., 180_633_600., -104_428_800., 752_640., 42_865_200., -43_097_152., 37_845_269., -31_777_436.]),
    (2, 348_364_800., &[-7_257_600., -23_224_320., 105_719_040., -152_616_960., 100_683_990., -14_930_208., -24_749_483.]),
    (3, 638_668_800., &[-22_619_520., 28_131_840., 29_795_040., -39_205_760., -101_880_889., 232_468_668.]),
    (4, 7_664_025_600., &[-208_945_440., 167_270_400., 876_745_056., -1_433_121_792., -324_154_477.]),
    (5, 2_490_808_320., &[-70_779_852., 67_920_528., 312_227_409., -457_888_660.]),
    (6, 116_237_721_600., &[-3_758_062_126., 3_665_348_512., 19_841_813_847.]),
    (7, 49_816_166_400., &[-1_979_471_673., 1_989_295_244.]),
    (8, 3_719_607_091_200., &[-191_773_887_257.]),
];

/// The constants of the Transverse Mercator series, derived once per ellipsoid
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SeriesConstants {
    /// The rectifying radius, *A*
    pub rectifying_radius: f64,
    /// Forward (conformal to TM) coefficients, α₂, α₄, ..., α₁₆
    pub alpha: [f64; SERIES_ORDER],
    /// Inverse (TM to conformal) coefficients, β₂, β₄, ..., β₁₆
    pub beta: [f64; SERIES_ORDER],
}

impl SeriesConstants {
    #[must_use]
    pub fn new(ellps: &Ellipsoid) -> SeriesConstants {
        let n = ellps.third_flattening();
        SeriesConstants {
            rectifying_radius: ellps.rectifying_radius(),
            alpha: evaluate(n, &ALPHA),
            beta: evaluate(n, &BETA),
        }
    }
}

fn evaluate(n: f64, polynomials: &[Polynomial; SERIES_ORDER]) -> [f64; SERIES_ORDER] {
    let mut result = [0.; SERIES_ORDER];
    for (coefficient, (k, divisor, p)) in result.iter_mut().zip(polynomials) {
        *coefficient = n.powi(*k) * horner(n, p) / divisor;
    }
    result
}

// ----- Tests ---------------------------------------------------------------------
