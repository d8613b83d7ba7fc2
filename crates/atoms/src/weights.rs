/// masses of the most abundant isotope of each element in Da, indexed by
/// atomic number
pub const WEIGHTS: [f64; 55] = [
    0.0,
    1.007_825_032_23,
    4.002_603_254_13,
    7.016_003_436_6,
    9.012_183_065,
    11.009_305_36,
    12.0,
    14.003_074_004_43,
    15.994_914_619_57,
    18.998_403_162_73,
    19.992_440_176_2,
    22.989_769_282,
    23.985_041_697,
    26.981_538_53,
    27.976_926_534_65,
    30.973_761_998_42,
    31.972_071_174_4,
    34.968_852_682,
    39.962_383_123_7,
    38.963_706_486_4,
    39.962_590_863,
    44.955_908_28,
    47.947_941_98,
    50.943_957_04,
    51.940_506_23,
    54.938_043_91,
    55.934_936_33,
    58.933_194_29,
    57.935_342_41,
    62.929_597_72,
    63.929_142_01,
    68.925_573_5,
    73.921_177_761,
    74.921_594_57,
    79.916_521_8,
    78.918_337_6,
    83.911_497_728_2,
    84.911_789_737_9,
    87.905_612_5,
    88.905_840_3,
    89.904_697_7,
    92.906_373,
    97.905_404_82,
    97.907_212_4,
    101.904_344_1,
    102.905_498,
    105.903_480_4,
    106.905_091_6,
    113.903_365_09,
    114.903_878_776,
    119.902_201_63,
    120.903_812,
    129.906_222_748,
    126.904_471_9,
    131.904_155_085_6,
];

/// single-bond covalent radii in Å from Cordero et al., Dalton Trans. 2832
/// (2008), indexed by atomic number. low-spin values are used for Mn and Fe
pub const COVALENT_RADII: [f64; 55] = [
    0.0, 0.31, 0.28, 1.28, 0.96, 0.84, 0.76, 0.71, 0.66, 0.57, 0.58, 1.66,
    1.41, 1.21, 1.11, 1.07, 1.05, 1.02, 1.06, 2.03, 1.76, 1.70, 1.60, 1.53,
    1.39, 1.39, 1.32, 1.26, 1.24, 1.32, 1.22, 1.22, 1.20, 1.19, 1.20, 1.20,
    1.16, 2.20, 1.95, 1.90, 1.75, 1.64, 1.54, 1.47, 1.46, 1.42, 1.39, 1.45,
    1.44, 1.42, 1.39, 1.39, 1.38, 1.39, 1.40,
];
