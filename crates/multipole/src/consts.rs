//! square roots of rationals used to normalize the real solid harmonics. each
//! `RTn_d` is √(n/d) to full double precision

pub(crate) const RT3_4: f64 = 0.866_025_403_784_438_6;
pub(crate) const RT1_3: f64 = 0.577_350_269_189_625_7;
pub(crate) const RT4_3: f64 = 1.154_700_538_379_251_5;

pub(crate) const RT5_8: f64 = 0.790_569_415_042_094_9;
pub(crate) const RT3_8: f64 = 0.612_372_435_695_794_5;
pub(crate) const RT1_24: f64 = 0.204_124_145_231_931_5;
pub(crate) const RT5_12: f64 = 0.645_497_224_367_902_8;
pub(crate) const RT2_3: f64 = 0.816_496_580_927_726;
pub(crate) const RT3_2: f64 = 1.224_744_871_391_589;
pub(crate) const RT3_5: f64 = 0.774_596_669_241_483_4;
pub(crate) const RT12_5: f64 = 1.549_193_338_482_966_8;
pub(crate) const RT1_10: f64 = 0.316_227_766_016_837_94;

pub(crate) const RT5_16: f64 = 0.559_016_994_374_947_5;
pub(crate) const RT5_64: f64 = 0.279_508_497_187_473_7;
pub(crate) const RT35_64: f64 = 0.739_509_972_887_452;
pub(crate) const RT45_128: f64 = 0.592_927_061_281_571_1;
pub(crate) const RT35_128: f64 = 0.522_912_516_583_797_2;
pub(crate) const RT5_128: f64 = 0.197_642_353_760_523_72;
pub(crate) const RT8_5: f64 = 1.264_911_064_067_351_8;
pub(crate) const RT4_5: f64 = 0.894_427_190_999_915_9;
pub(crate) const RT16_5: f64 = 1.788_854_381_999_831_7;
pub(crate) const RT8_35: f64 = 0.478_091_443_733_757_45;
pub(crate) const RT1_35: f64 = 0.169_030_850_945_703_3;
pub(crate) const RT16_35: f64 = 0.676_123_403_782_813_2;
