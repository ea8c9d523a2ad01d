use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageBuffer};
use ndarray::{ArrayD, Axis, IxDyn};

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

/// Expands directories into their image files (sorted by name) and keeps
/// explicit file paths in the order given.
pub fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut entries: Vec<PathBuf> = fs::read_dir(input)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| is_image(path))
                .collect();
            entries.sort();
            paths.extend(entries);
        } else {
            paths.push(input.clone());
        }
    }
    if paths.is_empty() {
        return Err("no input images found".into());
    }
    Ok(paths)
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Decodes every image into one `(N, H, W)` grayscale or `(N, H, W, 3)` RGB array.
pub fn load_sequence(paths: &[PathBuf], color: bool) -> Result<ArrayD<u8>, Box<dyn std::error::Error>> {
    let mut data = Vec::new();
    let mut size: Option<(u32, u32)> = None;

    for path in paths {
        let img = image::open(path).map_err(|e| format!("{}: {e}", path.display()))?;
        let dims = (img.width(), img.height());
        match size {
            None => size = Some(dims),
            Some(expected) if expected != dims => {
                return Err(format!(
                    "{} is {}x{}, expected {}x{} like the first frame",
                    path.display(),
                    dims.0,
                    dims.1,
                    expected.0,
                    expected.1
                )
                .into());
            }
            Some(_) => {}
        }
        if color {
            data.extend(img.to_rgb8().into_raw());
        } else {
            data.extend(img.to_luma8().into_raw());
        }
    }

    let (width, height) = size.ok_or("no input images found")?;
    let mut shape = vec![paths.len(), height as usize, width as usize];
    if color {
        shape.push(3);
    }
    log::debug!("Loaded {} frames of shape {:?}", paths.len(), &shape[1..]);
    Ok(ArrayD::from_shape_vec(IxDyn(&shape), data)?)
}

/// Sample types that can be written as grayscale or RGB images.
pub trait FramePixel: Copy {
    fn to_image(width: u32, height: u32, channels: Option<usize>, data: Vec<Self>) -> Option<DynamicImage>;
}

impl FramePixel for u8 {
    fn to_image(width: u32, height: u32, channels: Option<usize>, data: Vec<u8>) -> Option<DynamicImage> {
        match channels {
            None => ImageBuffer::from_raw(width, height, data).map(DynamicImage::ImageLuma8),
            Some(3) => ImageBuffer::from_raw(width, height, data).map(DynamicImage::ImageRgb8),
            Some(_) => None,
        }
    }
}

impl FramePixel for u16 {
    fn to_image(width: u32, height: u32, channels: Option<usize>, data: Vec<u16>) -> Option<DynamicImage> {
        match channels {
            None => ImageBuffer::from_raw(width, height, data).map(DynamicImage::ImageLuma16),
            Some(3) => ImageBuffer::from_raw(width, height, data).map(DynamicImage::ImageRgb16),
            Some(_) => None,
        }
    }
}

/// Writes each frame of a `(N, H, W[, C])` array to `dir/frame_NNNNN.png`.
pub fn write_sequence<P: FramePixel>(
    frames: &ArrayD<P>,
    dir: &Path,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(frames.len_of(Axis(0)));

    for (index, frame) in frames.axis_iter(Axis(0)).enumerate() {
        let shape = frame.shape();
        let (height, width) = (shape[0] as u32, shape[1] as u32);
        let channels = shape.get(2).copied();
        let pixels: Vec<P> = frame.iter().copied().collect();
        let img = P::to_image(width, height, channels, pixels)
            .ok_or_else(|| format!("cannot encode frame {index} with shape {shape:?}"))?;

        let path = dir.join(format!("frame_{index:05}.png"));
        img.save(&path)?;
        written.push(path);
    }
    Ok(written)
}
