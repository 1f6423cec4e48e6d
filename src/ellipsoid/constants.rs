/// Built-in ellipsoids: name, semimajor axis (m), reciprocal flattening, description
#[rustfmt::skip]
pub(crate) const ELLIPSOID_LIST: [(&str, f64, f64, &str); 9] = [
    ("GRS80",   6_378_137.0,   298.257_222_100_882_7, "GRS 1980(IUGG, 1980)"),
    ("WGS84",   6_378_137.0,   298.257_223_563,   "WGS 84"),
    ("ANS",     6_378_160.0,   298.25,            "Australian National Spheroid"),
    ("intl",    6_378_388.0,   297.,              "International 1924 (Hayford 1909, 1910)"),
    ("Helmert", 6_378_200.0,   298.3,             "Helmert 1906"),
    ("clrk66",  6_378_206.4,   294.978_698_2,     "Clarke 1866"),
    ("clrk80",  6_378_249.145, 293.465,           "Clarke 1880 mod."),
    ("bessel",  6_377_397.155, 299.152_812_8,     "Bessel 1841"),
    ("airy",    6_377_563.396, 299.324_964_6,     "Airy 1830"),
];

/// Coefficients of the normalized meridian arc unit as a polynomial in n²,
/// [Karney (2011)](crate::Bibliography::Kar11) eq. (14), to 8th order in n
pub(crate) const MERIDIAN_ARC_COEFFICIENTS: [f64; 5] =
    [1., 1. / 4., 1. / 64., 1. / 256., 25. / 16384.];
