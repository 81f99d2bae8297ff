//! A minimal ICC profile reader.
//!
//! Only the parts needed to map device colors into sRGB are implemented:
//! matrix-shaper profiles (TRC curves plus colorant matrix), gray profiles
//! and LUT-based profiles (`mft1`/`mft2` A2B tags). Everything is converted
//! eagerly into a [`Pipeline`] so sampling never touches the raw profile
//! again.

pub(crate) mod lut;
pub(crate) mod transform;

use crate::RenderingIntent;
use lumen_common::byte::Reader;
use lut::Clut;
use transform::{
    D50_WHITE, D65_WHITE, Mat3, SRGB_D65_XYZ_TO_RGB, ToneCurve, adaptation, encode_srgb,
    lab_to_xyz, table_interp,
};

const GRAY_SIG: u32 = u32::from_be_bytes(*b"GRAY");
const RGB_SIG: u32 = u32::from_be_bytes(*b"RGB ");
const CMYK_SIG: u32 = u32::from_be_bytes(*b"CMYK");
const LAB_SIG: u32 = u32::from_be_bytes(*b"Lab ");
const XYZ_SIG: u32 = u32::from_be_bytes(*b"XYZ ");

const CURV_SIG: u32 = u32::from_be_bytes(*b"curv");
const PARA_SIG: u32 = u32::from_be_bytes(*b"para");
const MFT1_SIG: u32 = u32::from_be_bytes(*b"mft1");
const MFT2_SIG: u32 = u32::from_be_bytes(*b"mft2");

const R_TRC: u32 = u32::from_be_bytes(*b"rTRC");
const G_TRC: u32 = u32::from_be_bytes(*b"gTRC");
const B_TRC: u32 = u32::from_be_bytes(*b"bTRC");
const GRAY_TRC: u32 = u32::from_be_bytes(*b"kTRC");
const R_XYZ: u32 = u32::from_be_bytes(*b"rXYZ");
const G_XYZ: u32 = u32::from_be_bytes(*b"gXYZ");
const B_XYZ: u32 = u32::from_be_bytes(*b"bXYZ");
const A2B0: u32 = u32::from_be_bytes(*b"A2B0");
const A2B1: u32 = u32::from_be_bytes(*b"A2B1");
const A2B2: u32 = u32::from_be_bytes(*b"A2B2");
const DESC: u32 = u32::from_be_bytes(*b"desc");

const MAX_TAG_COUNT: u32 = 1024;
const MAX_TABLE_ENTRIES: u16 = 4096;

/// A parsed ICC profile, reduced to its conversion pipelines.
#[derive(Debug, Clone)]
pub(crate) struct IccProfile {
    num_components: u8,
    base: Pipeline,
    relative: Option<Pipeline>,
    saturation: Option<Pipeline>,
    srgb: bool,
}

impl IccProfile {
    /// Parse a profile, checking that its data color space has
    /// `num_components` channels.
    pub(crate) fn new(data: &[u8], num_components: u8) -> Option<Self> {
        let mut header = Reader::new_at(data, 16)?;
        let color_space = header.read_u32()?;
        let pcs_sig = header.read_u32()?;

        let header_components = match color_space {
            GRAY_SIG => 1,
            RGB_SIG | LAB_SIG => 3,
            CMYK_SIG => 4,
            _ => return None,
        };

        if header_components != num_components {
            return None;
        }

        let pcs = match pcs_sig {
            XYZ_SIG => Pcs::Xyz,
            LAB_SIG => Pcs::Lab,
            _ => return None,
        };

        let tags = TagTable::new(data)?;

        let base = tags
            .find(A2B0)
            .and_then(|tag| Pipeline::new_lut(tag, num_components, pcs))
            .or_else(|| Pipeline::new_shaper(&tags, num_components))?;

        let relative = tags
            .find(A2B1)
            .and_then(|tag| Pipeline::new_lut(tag, num_components, pcs));
        let saturation = tags
            .find(A2B2)
            .and_then(|tag| Pipeline::new_lut(tag, num_components, pcs));

        Some(Self {
            num_components,
            base,
            relative,
            saturation,
            srgb: is_srgb_description(&tags),
        })
    }

    /// The number of components of the profile's data color space.
    pub(crate) fn num_components(&self) -> u8 {
        self.num_components
    }

    /// Whether the profile describes sRGB, making the conversion a no-op.
    pub(crate) fn is_srgb(&self) -> bool {
        self.srgb
    }

    /// Convert normalized device components to encoded sRGB.
    pub(crate) fn to_srgb(&self, intent: RenderingIntent, input: &[f32]) -> [f32; 3] {
        let pipeline = match intent {
            RenderingIntent::RelativeColorimetric | RenderingIntent::AbsoluteColorimetric => {
                self.relative.as_ref().unwrap_or(&self.base)
            }
            RenderingIntent::Perceptual => &self.base,
            RenderingIntent::Saturation => self.saturation.as_ref().unwrap_or(&self.base),
        };

        pipeline.to_srgb(input)
    }
}

/// The profile connection space of an A2B tag.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Pcs {
    Xyz,
    Lab,
}

#[derive(Debug, Clone)]
enum Pipeline {
    /// A single gray TRC; the resulting luminance is encoded directly.
    Gray { curve: ToneCurve },
    /// Per-channel TRCs followed by a combined colorant/adaptation matrix.
    Shaper {
        curves: [ToneCurve; 3],
        matrix: Mat3,
    },
    /// An `mft1`/`mft2` tag: input curves, CLUT, output curves, PCS decode.
    Lut(LutPipeline),
}

impl Pipeline {
    fn new_shaper(tags: &TagTable<'_>, num_components: u8) -> Option<Self> {
        match num_components {
            1 => {
                let curve = parse_curve(tags.find(GRAY_TRC)?)?;
                Some(Self::Gray { curve })
            }
            3 => {
                let curves = [
                    parse_curve(tags.find(R_TRC)?)?,
                    parse_curve(tags.find(G_TRC)?)?,
                    parse_curve(tags.find(B_TRC)?)?,
                ];

                let colorants = Mat3::from_columns(
                    parse_xyz(tags.find(R_XYZ)?)?,
                    parse_xyz(tags.find(G_XYZ)?)?,
                    parse_xyz(tags.find(B_XYZ)?)?,
                );

                // Colorants are D50-relative per the ICC spec; fold the
                // adaptation to D65 and the sRGB matrix in right away.
                let matrix = SRGB_D65_XYZ_TO_RGB
                    .mul_mat(&adaptation(D50_WHITE, D65_WHITE))
                    .mul_mat(&colorants);

                Some(Self::Shaper { curves, matrix })
            }
            _ => None,
        }
    }

    fn new_lut(data: &[u8], num_components: u8, pcs: Pcs) -> Option<Self> {
        LutPipeline::new(data, num_components, pcs).map(Self::Lut)
    }

    fn to_srgb(&self, input: &[f32]) -> [f32; 3] {
        match self {
            Self::Gray { curve } => {
                let y = curve.eval(input.first().copied().unwrap_or(0.0));
                let encoded = encode_srgb(y);
                [encoded; 3]
            }
            Self::Shaper { curves, matrix } => {
                let lin = [
                    curves[0].eval(input.first().copied().unwrap_or(0.0)),
                    curves[1].eval(input.get(1).copied().unwrap_or(0.0)),
                    curves[2].eval(input.get(2).copied().unwrap_or(0.0)),
                ];

                let rgb = matrix.mul_vec(lin);
                [
                    encode_srgb(rgb[0]),
                    encode_srgb(rgb[1]),
                    encode_srgb(rgb[2]),
                ]
            }
            Self::Lut(lut) => lut.to_srgb(input),
        }
    }
}

#[derive(Debug, Clone)]
struct LutPipeline {
    /// Applied to the raw input for three-channel tags.
    input_matrix: Option<Mat3>,
    input: Vec<Vec<f32>>,
    clut: Clut,
    output: Vec<Vec<f32>>,
    pcs_matrix: Mat3,
    pcs: Pcs,
    /// `mft2` tags use the legacy 16-bit PCS encodings.
    wide: bool,
}

impl LutPipeline {
    fn new(data: &[u8], num_components: u8, pcs: Pcs) -> Option<Self> {
        let mut r = Reader::new(data);
        let sig = r.read_u32()?;
        r.skip(4)?;

        let wide = match sig {
            MFT1_SIG => false,
            MFT2_SIG => true,
            _ => return None,
        };

        let in_ch = r.read_byte()?;
        let out_ch = r.read_byte()?;
        let grid = r.read_byte()?;
        r.skip(1)?;

        if in_ch != num_components || out_ch != 3 || grid < 2 {
            return None;
        }

        let mut matrix_entries = [0.0f32; 9];
        for entry in &mut matrix_entries {
            *entry = read_s15f16(&mut r)?;
        }

        let matrix = Mat3(matrix_entries);
        let input_matrix = (in_ch == 3 && matrix_entries != Mat3::IDENTITY.0).then_some(matrix);

        let (input_entries, output_entries) = if wide {
            let input = r.read_u16()?;
            let output = r.read_u16()?;

            if !(2..=MAX_TABLE_ENTRIES).contains(&input)
                || !(2..=MAX_TABLE_ENTRIES).contains(&output)
            {
                return None;
            }

            (input as usize, output as usize)
        } else {
            (256, 256)
        };

        let mut read_table = |r: &mut Reader<'_>, entries: usize| -> Option<Vec<f32>> {
            if wide {
                let bytes = r.read_bytes(entries * 2)?;
                Some(
                    bytes
                        .chunks_exact(2)
                        .map(|b| f32::from(u16::from_be_bytes([b[0], b[1]])) / 65535.0)
                        .collect(),
                )
            } else {
                let bytes = r.read_bytes(entries)?;
                Some(bytes.iter().map(|&b| f32::from(b) / 255.0).collect())
            }
        };

        let mut input = Vec::with_capacity(in_ch as usize);
        for _ in 0..in_ch {
            input.push(read_table(&mut r, input_entries)?);
        }

        let clut_entries = (grid as usize).checked_pow(u32::from(in_ch))? * 3;
        let clut_data = read_table(&mut r, clut_entries)?;
        let clut = Clut::new(in_ch, u16::from(grid), clut_data)?;

        let mut output = Vec::with_capacity(3);
        for _ in 0..3 {
            output.push(read_table(&mut r, output_entries)?);
        }

        let pcs_matrix = SRGB_D65_XYZ_TO_RGB.mul_mat(&adaptation(D50_WHITE, D65_WHITE));

        Some(Self {
            input_matrix,
            input,
            clut,
            output,
            pcs_matrix,
            pcs,
            wide,
        })
    }

    fn to_srgb(&self, input: &[f32]) -> [f32; 3] {
        let mut raw = [0.0f32; 4];
        for (ch, slot) in raw.iter_mut().enumerate().take(self.input.len()) {
            *slot = input.get(ch).copied().unwrap_or(0.0);
        }

        if let Some(matrix) = &self.input_matrix {
            let mapped = matrix.mul_vec([raw[0], raw[1], raw[2]]);
            raw[..3].copy_from_slice(&mapped);
        }

        let mut shaped = [0.0f32; 4];
        for (ch, table) in self.input.iter().enumerate() {
            shaped[ch] = table_interp(table, raw[ch]);
        }

        let interpolated = self.clut.sample(&shaped[..self.clut.in_ch()]);

        let mut pcs_value = [0.0f32; 3];
        for (ch, table) in self.output.iter().enumerate() {
            pcs_value[ch] = table_interp(table, interpolated[ch]);
        }

        let xyz = match self.pcs {
            Pcs::Lab => {
                let (l, a, b) = if self.wide {
                    (
                        pcs_value[0] * (65535.0 / 652.8),
                        pcs_value[1] * (65535.0 / 256.0) - 128.0,
                        pcs_value[2] * (65535.0 / 256.0) - 128.0,
                    )
                } else {
                    (
                        pcs_value[0] * 100.0,
                        pcs_value[1] * 255.0 - 128.0,
                        pcs_value[2] * 255.0 - 128.0,
                    )
                };

                lab_to_xyz(l, a, b, D50_WHITE)
            }
            // 16-bit XYZ is encoded as u1.15 fixed point.
            Pcs::Xyz => {
                let scale = 65535.0 / 32768.0;
                [
                    pcs_value[0] * scale,
                    pcs_value[1] * scale,
                    pcs_value[2] * scale,
                ]
            }
        };

        let rgb = self.pcs_matrix.mul_vec(xyz);
        [
            encode_srgb(rgb[0]),
            encode_srgb(rgb[1]),
            encode_srgb(rgb[2]),
        ]
    }
}

struct TagTable<'a> {
    data: &'a [u8],
    entries: Vec<(u32, usize, usize)>,
}

impl<'a> TagTable<'a> {
    fn new(data: &'a [u8]) -> Option<Self> {
        let mut r = Reader::new_at(data, 128)?;
        let count = r.read_u32()?;

        if count > MAX_TAG_COUNT {
            return None;
        }

        let mut entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let sig = r.read_u32()?;
            let offset = r.read_u32()? as usize;
            let size = r.read_u32()? as usize;
            entries.push((sig, offset, size));
        }

        Some(Self { data, entries })
    }

    fn find(&self, sig: u32) -> Option<&'a [u8]> {
        let (_, offset, size) = self.entries.iter().find(|(s, _, _)| *s == sig)?;
        self.data.get(*offset..offset.checked_add(*size)?)
    }
}

fn read_s15f16(r: &mut Reader<'_>) -> Option<f32> {
    Some(r.read_i32()? as f32 / 65536.0)
}

fn parse_xyz(data: &[u8]) -> Option<[f32; 3]> {
    let mut r = Reader::new(data);

    if r.read_u32()? != XYZ_SIG {
        return None;
    }
    r.skip(4)?;

    Some([
        read_s15f16(&mut r)?,
        read_s15f16(&mut r)?,
        read_s15f16(&mut r)?,
    ])
}

fn parse_curve(data: &[u8]) -> Option<ToneCurve> {
    let mut r = Reader::new(data);
    let sig = r.read_u32()?;
    r.skip(4)?;

    match sig {
        CURV_SIG => {
            let count = r.read_u32()?;

            match count {
                0 => Some(ToneCurve::Identity),
                // A single entry is a u8.8 fixed point gamma value.
                1 => Some(ToneCurve::Gamma(f32::from(r.read_u16()?) / 256.0)),
                _ => {
                    let bytes = r.read_bytes(count.checked_mul(2)? as usize)?;
                    let table = bytes
                        .chunks_exact(2)
                        .map(|b| f32::from(u16::from_be_bytes([b[0], b[1]])) / 65535.0)
                        .collect();

                    Some(ToneCurve::Table(table))
                }
            }
        }
        PARA_SIG => {
            let kind = r.read_u16()?;
            r.skip(2)?;

            let num_params = match kind {
                0 => 1,
                1 => 3,
                2 => 4,
                3 => 5,
                4 => 7,
                _ => return None,
            };

            let mut params = [0.0f32; 7];
            for param in params.iter_mut().take(num_params) {
                *param = read_s15f16(&mut r)?;
            }

            Some(ToneCurve::Parametric { kind, params })
        }
        _ => None,
    }
}

fn is_srgb_description(tags: &TagTable<'_>) -> bool {
    let Some(data) = tags.find(DESC) else {
        return false;
    };

    let mut r = Reader::new(data);
    let Some(sig) = r.read_u32() else {
        return false;
    };

    if sig != DESC || r.skip(4).is_none() {
        return false;
    }

    let Some(count) = r.read_u32() else {
        return false;
    };
    let Some(bytes) = r.read_bytes(count as usize) else {
        return false;
    };

    let description = String::from_utf8_lossy(bytes).to_ascii_lowercase();
    description.contains("srgb")
}


#[cfg(test)]
mod tests {
    use super::*;
    use test_profiles::{build_profile, gamma_curve, xyz_tag};

    fn gray_profile(gamma: f32) -> Vec<u8> {
        build_profile(b"GRAY", b"XYZ ", &[(b"kTRC", gamma_curve(gamma))])
    }

    #[test]
    fn gray_profile_applies_the_trc() {
        let profile = IccProfile::new(&gray_profile(2.0), 1).unwrap();

        for t in [0.0f32, 0.25, 0.5, 0.75, 1.0] {
            let [r, g, b] = profile.to_srgb(RenderingIntent::RelativeColorimetric, &[t]);
            let want = encode_srgb(t.powf(2.0));

            assert_eq!(r, g);
            assert_eq!(g, b);
            assert!((r - want).abs() < 1.0 / 255.0);
        }
    }

    #[test]
    fn component_count_must_match() {
        assert!(IccProfile::new(&gray_profile(1.0), 3).is_none());
    }

    #[test]
    fn truncated_profile_is_rejected() {
        let data = gray_profile(1.0);
        assert!(IccProfile::new(&data[..64], 1).is_none());
    }

    #[test]
    fn matrix_shaper_maps_white_to_white() {
        // sRGB-like primaries (D50-adapted colorant values).
        let profile_data = build_profile(
            b"RGB ",
            b"XYZ ",
            &[
                (b"rTRC", gamma_curve(1.0)),
                (b"gTRC", gamma_curve(1.0)),
                (b"bTRC", gamma_curve(1.0)),
                (b"rXYZ", xyz_tag([0.4360, 0.2225, 0.0139])),
                (b"gXYZ", xyz_tag([0.3851, 0.7169, 0.0971])),
                (b"bXYZ", xyz_tag([0.1431, 0.0606, 0.7139])),
            ],
        );

        let profile = IccProfile::new(&profile_data, 3).unwrap();

        let white = profile.to_srgb(RenderingIntent::RelativeColorimetric, &[1.0, 1.0, 1.0]);
        for v in white {
            assert!(v > 0.99, "white mapped to {white:?}");
        }

        let black = profile.to_srgb(RenderingIntent::RelativeColorimetric, &[0.0, 0.0, 0.0]);
        for v in black {
            assert!(v < 0.01, "black mapped to {black:?}");
        }

        // The red primary stays predominantly red.
        let [r, g, _] = profile.to_srgb(RenderingIntent::RelativeColorimetric, &[1.0, 0.0, 0.0]);
        assert!(r > 0.9);
        assert!(g < 0.3);
    }

    #[test]
    fn srgb_description_is_detected() {
        let mut desc = Vec::new();
        desc.extend(b"desc");
        desc.extend([0u8; 4]);
        let text = b"sRGB IEC61966-2.1";
        desc.extend((text.len() as u32).to_be_bytes());
        desc.extend(text);

        let profile_data = build_profile(
            b"GRAY",
            b"XYZ ",
            &[(b"kTRC", gamma_curve(1.0)), (b"desc", desc)],
        );

        let profile = IccProfile::new(&profile_data, 1).unwrap();
        assert!(profile.is_srgb());

        let plain = IccProfile::new(&gray_profile(1.0), 1).unwrap();
        assert!(!plain.is_srgb());
    }

    #[test]
    fn cmyk_profile_requires_a_lut() {
        // No A2B0 tag, so a CMYK profile cannot be built.
        let profile_data = build_profile(b"CMYK", b"Lab ", &[(b"kTRC", gamma_curve(1.0))]);
        assert!(IccProfile::new(&profile_data, 4).is_none());
    }
}
