//! Single-band GeoTIFF digital elevation model (DEM) loading.
//!
//! # References
//!
//! 1. [GeoTIFF standard](https://docs.ogc.org/is/19-008r4/19-008r4.html)
//! 1. [GDAL GeoTIFF driver, nodata tag](https://gdal.org/drivers/raster/gtiff.html)
//! 1. [AHN, the Dutch national height model](https://www.ahn.nl)

mod error;

pub use crate::error::DemError;
use geo::geometry::Coord;
use std::{
    fs::File,
    io::{BufReader, Read, Seek},
    path::Path,
};
use tiff::{
    decoder::{ifd::Value, Decoder, DecodingResult, Limits},
    tags::Tag,
    ColorType,
};

/// Base floating point type used for map coordinates and derived values.
pub type C = f64;

/// GeoTIFF `ModelPixelScaleTag`.
const TAG_MODEL_PIXEL_SCALE: u16 = 33550;
/// GeoTIFF `ModelTiepointTag`.
const TAG_MODEL_TIEPOINT: u16 = 33922;
/// GDAL's ASCII nodata sentinel tag.
const TAG_GDAL_NODATA: u16 = 42113;

pub struct Dem {
    /// Affine georeference for this grid.
    transform: GeoTransform,

    /// Nodata sentinel, when the raster declares one.
    nodata: Option<C>,

    /// Number of (rows, columns) in this grid.
    dimensions: (usize, usize),

    /// Row-major elevation samples. Scanline order follows the source
    /// raster until [`Dem::south_up`] reverses it.
    samples: Vec<f32>,
}

impl Dem {
    /// Returns a Dem read from the single-band GeoTIFF at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DemError> {
        let file = BufReader::new(File::open(path)?);
        // National DEMs overflow the decoder's default allocation cap.
        let mut decoder = Decoder::new(file)?.with_limits(Limits::unlimited());

        let (width, height) = decoder.dimensions()?;
        let dimensions = (height as usize, width as usize);
        if dimensions.0 * dimensions.1 == 0 {
            return Err(DemError::EmptyRaster);
        }

        match decoder.colortype()? {
            ColorType::Gray(_) => (),
            other => return Err(DemError::SampleLayout(format!("{other:?}"))),
        }

        let nodata = tag_nodata(&mut decoder)?;
        let transform = match (
            tag_f64_vec(&mut decoder, TAG_MODEL_PIXEL_SCALE)?,
            tag_f64_vec(&mut decoder, TAG_MODEL_TIEPOINT)?,
        ) {
            (Some(scale), Some(tie)) if scale.len() >= 2 && tie.len() >= 6 => GeoTransform {
                origin: Coord {
                    x: tie[3] - tie[0] * scale[0],
                    y: tie[4] + tie[1] * scale[1],
                },
                pixel_width: scale[0],
                pixel_height: -scale[1],
            },
            _ => GeoTransform::unit(dimensions),
        };

        let samples = to_f32(decoder.read_image()?);
        if samples.len() != dimensions.0 * dimensions.1 {
            return Err(DemError::SampleCount {
                expected: dimensions.0 * dimensions.1,
                got: samples.len(),
            });
        }

        Ok(Self {
            transform,
            nodata,
            dimensions,
            samples,
        })
    }

    /// Builds a grid directly from row-major samples, with a unit
    /// georeference and no nodata sentinel.
    pub fn from_samples(samples: Vec<f32>, dimensions: (usize, usize)) -> Result<Self, DemError> {
        if samples.len() != dimensions.0 * dimensions.1 {
            return Err(DemError::SampleCount {
                expected: dimensions.0 * dimensions.1,
                got: samples.len(),
            });
        }
        Ok(Self {
            transform: GeoTransform::unit(dimensions),
            nodata: None,
            dimensions,
            samples,
        })
    }

    /// Clamps every sample to `[lo, hi]`, suppressing sensor artifacts
    /// and outliers.
    pub fn clamped(mut self, lo: f32, hi: f32) -> Self {
        for sample in &mut self.samples {
            *sample = sample.clamp(lo, hi);
        }
        self
    }

    /// Reverses scanline order so row 0 is the southernmost line.
    ///
    /// GeoTIFF scanlines run north to south; rendering with the origin
    /// at the lower-left wants them the other way around.
    pub fn south_up(mut self) -> Self {
        let (rows, cols) = self.dimensions;
        for row in 0..rows / 2 {
            let (a, b) = (row * cols, (rows - 1 - row) * cols);
            for col in 0..cols {
                self.samples.swap(a + col, b + col);
            }
        }
        self
    }

    /// Returns the number of samples in this grid.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        let (rows, cols) = self.dimensions;
        rows * cols
    }

    /// Returns the number of (rows, columns) in this grid.
    pub fn dimensions(&self) -> (usize, usize) {
        self.dimensions
    }

    /// Returns the sample at `(row, col)`, or `None` when out of range.
    pub fn get(&self, (row, col): (usize, usize)) -> Option<f32> {
        let (rows, cols) = self.dimensions;
        if row < rows && col < cols {
            Some(self.samples[row * cols + col])
        } else {
            None
        }
    }

    /// Returns the lowest elevation sample in this grid.
    pub fn min_elevation(&self) -> f32 {
        self.samples.iter().copied().fold(f32::INFINITY, f32::min)
    }

    /// Returns the highest elevation sample in this grid.
    pub fn max_elevation(&self) -> f32 {
        self.samples
            .iter()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Returns the raster's declared nodata sentinel, if any.
    pub fn nodata(&self) -> Option<C> {
        self.nodata
    }

    /// Returns all samples in row-major order.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Returns an iterator over scanlines.
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.samples.chunks(self.dimensions.1.max(1))
    }

    /// Returns the (SW, NE) map-coordinate corners of this grid.
    pub fn bounds(&self) -> (Coord<C>, Coord<C>) {
        let (rows, cols) = self.dimensions;
        #[allow(clippy::cast_precision_loss)]
        let sw = self.transform.pixel_to_map(0.0, rows as C);
        #[allow(clippy::cast_precision_loss)]
        let ne = self.transform.pixel_to_map(cols as C, 0.0);
        (sw, ne)
    }
}

/// Affine georeference mapping pixel indices to map coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoTransform {
    /// Map coordinates of the outer corner of the first scanline's
    /// first pixel.
    origin: Coord<C>,

    /// Pixel width in map units.
    pixel_width: C,

    /// Pixel height in map units. Negative: scanlines run north to
    /// south.
    pixel_height: C,
}

impl GeoTransform {
    /// One map unit per pixel, origin at the grid's NW corner.
    #[allow(clippy::cast_precision_loss)]
    fn unit(dimensions: (usize, usize)) -> Self {
        Self {
            origin: Coord {
                x: 0.0,
                y: dimensions.0 as C,
            },
            pixel_width: 1.0,
            pixel_height: -1.0,
        }
    }

    /// Map coordinates of the `(col, row)` pixel corner.
    pub fn pixel_to_map(&self, col: C, row: C) -> Coord<C> {
        Coord {
            x: self.origin.x + col * self.pixel_width,
            y: self.origin.y + row * self.pixel_height,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn to_f32(decoded: DecodingResult) -> Vec<f32> {
    match decoded {
        DecodingResult::U8(samples) => samples.iter().map(|&v| f32::from(v)).collect(),
        DecodingResult::U16(samples) => samples.iter().map(|&v| f32::from(v)).collect(),
        DecodingResult::U32(samples) => samples.iter().map(|&v| v as f32).collect(),
        DecodingResult::U64(samples) => samples.iter().map(|&v| v as f32).collect(),
        DecodingResult::I8(samples) => samples.iter().map(|&v| f32::from(v)).collect(),
        DecodingResult::I16(samples) => samples.iter().map(|&v| f32::from(v)).collect(),
        DecodingResult::I32(samples) => samples.iter().map(|&v| v as f32).collect(),
        DecodingResult::I64(samples) => samples.iter().map(|&v| v as f32).collect(),
        DecodingResult::F32(samples) => samples,
        DecodingResult::F64(samples) => samples.iter().map(|&v| v as f32).collect(),
    }
}

fn tag_f64_vec<R: Read + Seek>(
    decoder: &mut Decoder<R>,
    tag: u16,
) -> Result<Option<Vec<C>>, DemError> {
    match decoder.find_tag(Tag::Unknown(tag))? {
        Some(value) => Ok(Some(value.into_f64_vec()?)),
        None => Ok(None),
    }
}

fn tag_nodata<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<Option<C>, DemError> {
    let text = match decoder.find_tag(Tag::Unknown(TAG_GDAL_NODATA))? {
        Some(Value::Ascii(text)) => text,
        _ => return Ok(None),
    };
    Ok(text.trim_end_matches('\0').trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::{Dem, DemError};
    use geo::geometry::Coord;

    fn ramp(rows: usize, cols: usize) -> Vec<f32> {
        (0..rows * cols).map(|i| i as f32).collect()
    }

    #[test]
    fn test_from_samples_dimensions() {
        let dem = Dem::from_samples(ramp(2, 3), (2, 3)).unwrap();
        assert_eq!(dem.dimensions(), (2, 3));
        assert_eq!(dem.len(), 6);
        assert_eq!(dem.get((1, 2)), Some(5.0));
        assert_eq!(dem.get((2, 0)), None);
    }

    #[test]
    fn test_sample_count_mismatch() {
        assert!(matches!(
            Dem::from_samples(ramp(2, 3), (3, 3)),
            Err(DemError::SampleCount {
                expected: 9,
                got: 6
            })
        ));
    }

    #[test]
    fn test_south_up_reverses_scanlines() {
        let dem = Dem::from_samples(ramp(2, 3), (2, 3)).unwrap().south_up();
        assert_eq!(dem.samples(), &[3.0, 4.0, 5.0, 0.0, 1.0, 2.0]);
        // A second flip restores file order.
        let dem = dem.south_up();
        assert_eq!(dem.samples(), ramp(2, 3).as_slice());
    }

    #[test]
    fn test_clamped_bounds() {
        let dem = Dem::from_samples(vec![-5.0, 0.5, 250.0], (1, 3))
            .unwrap()
            .clamped(0.0, 200.0);
        assert_eq!(dem.samples(), &[0.0, 0.5, 200.0]);
    }

    #[test]
    fn test_min_max_elevation() {
        let dem = Dem::from_samples(vec![3.0, -1.5, 42.0, 7.0], (2, 2)).unwrap();
        assert_eq!(dem.min_elevation(), -1.5);
        assert_eq!(dem.max_elevation(), 42.0);
    }

    #[test]
    fn test_unit_transform_bounds() {
        let dem = Dem::from_samples(ramp(2, 3), (2, 3)).unwrap();
        let (sw, ne) = dem.bounds();
        assert_eq!(sw, Coord { x: 0.0, y: 0.0 });
        assert_eq!(ne, Coord { x: 3.0, y: 2.0 });
    }

    #[test]
    fn test_geotiff_roundtrip() {
        use tiff::encoder::{colortype, TiffEncoder};

        let samples: Vec<f32> = vec![0.0, 1.5, -3.0, 10.0, 200.5, 7.25];
        let path = std::env::temp_dir().join("demgrid-roundtrip.tif");
        {
            let file = std::fs::File::create(&path).unwrap();
            let mut tiff = TiffEncoder::new(file).unwrap();
            tiff.write_image::<colortype::Gray32Float>(3, 2, &samples)
                .unwrap();
        }

        let dem = Dem::load(&path).unwrap();
        assert_eq!(dem.dimensions(), (2, 3));
        assert_eq!(dem.samples(), samples.as_slice());
        assert_eq!(dem.nodata(), None);

        std::fs::remove_file(&path).ok();
    }
}
