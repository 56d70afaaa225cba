//! GPU textures and background image decoding.
//!
//! Images are decoded off the render thread by a [`TextureLoader`] and
//! uploaded once the frame loop polls them in.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::error::{Error, Result};
use crate::gpu::GpuContext;

/// A GPU texture that can be bound to shaders.
#[derive(Debug)]
pub struct Texture {
    #[allow(dead_code)]
    pub(crate) texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    pub(crate) sampler: wgpu::Sampler,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Create a texture from raw RGBA data.
    ///
    /// Normal maps must use a linear format such as `Rgba8Unorm`; color
    /// images use `Rgba8UnormSrgb`.
    pub fn from_rgba(
        gpu: &GpuContext,
        data: &[u8],
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        label: &str,
    ) -> Self {
        use wgpu::util::DeviceExt;

        let texture = gpu.device.create_texture_with_data(
            &gpu.queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            data,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = gpu.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{} Sampler", label)),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            width,
            height,
        }
    }

    /// A 1x1 normal map pointing straight out of the surface.
    pub fn flat_normal(gpu: &GpuContext) -> Self {
        Self::from_rgba(
            gpu,
            &FLAT_NORMAL,
            1,
            1,
            wgpu::TextureFormat::Rgba8Unorm,
            "Flat Normal Map",
        )
    }

    /// Upload a decoded normal map.
    pub fn normal_map(gpu: &GpuContext, image: &DecodedImage) -> Self {
        Self::from_rgba(
            gpu,
            &image.pixels,
            image.width,
            image.height,
            wgpu::TextureFormat::Rgba8Unorm,
            &image.path.display().to_string(),
        )
    }
}

/// Tangent-space `(0, 0, 1)` encoded as RGBA8.
pub const FLAT_NORMAL: [u8; 4] = [128, 128, 255, 255];

/// RGBA8 pixels read from disk, not yet on the GPU.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Self::decode(path).map_err(|source| Error::Texture {
            path: path.display().to_string(),
            source,
        })
    }

    fn decode(path: &Path) -> std::result::Result<Self, image::ImageError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            path: path.to_path_buf(),
            width,
            height,
            pixels: img.into_raw(),
        })
    }
}

/// Where a background decode stands.
#[derive(Debug)]
pub enum LoadStatus {
    Pending,
    Ready(DecodedImage),
    Failed(Error),
}

/// Decodes one image on a worker thread.
///
/// [`poll`](Self::poll) never blocks. It yields `Ready` or `Failed` exactly
/// once, then reports `Pending` forever after.
pub struct TextureLoader {
    path: PathBuf,
    receiver: Option<Receiver<std::result::Result<DecodedImage, image::ImageError>>>,
}

impl TextureLoader {
    pub fn spawn(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (sender, receiver) = mpsc::channel();
        let job = path.clone();

        thread::spawn(move || {
            // The receiver may be gone if the app shut down first.
            let _ = sender.send(DecodedImage::decode(&job));
        });

        log::debug!("Loading {} in the background", path.display());
        Self {
            path,
            receiver: Some(receiver),
        }
    }

    pub fn poll(&mut self) -> LoadStatus {
        let Some(receiver) = &self.receiver else {
            return LoadStatus::Pending;
        };

        let status = match receiver.try_recv() {
            Err(TryRecvError::Empty) => return LoadStatus::Pending,
            Ok(Ok(image)) => LoadStatus::Ready(image),
            Ok(Err(source)) => LoadStatus::Failed(Error::Texture {
                path: self.path.display().to_string(),
                source,
            }),
            Err(TryRecvError::Disconnected) => LoadStatus::Failed(Error::LoaderGone {
                path: self.path.display().to_string(),
            }),
        };
        self.receiver = None;
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait(loader: &mut TextureLoader) -> LoadStatus {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            match loader.poll() {
                LoadStatus::Pending if Instant::now() < deadline => {
                    thread::sleep(Duration::from_millis(5));
                }
                status => return status,
            }
        }
    }

    fn write_png(name: &str) -> PathBuf {
        let file = format!("sphere-glow-{}-{}.png", name, std::process::id());
        let path = std::env::temp_dir().join(file);
        let img = image::RgbaImage::from_fn(2, 3, |x, y| {
            image::Rgba([x as u8 * 100, y as u8 * 50, 255, 255])
        });
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn flat_normal_points_out_of_surface() {
        let [r, g, b, a] = FLAT_NORMAL.map(|c| c as f32 / 255.0 * 2.0 - 1.0);
        assert!(r.abs() < 0.01 && g.abs() < 0.01);
        assert_eq!(b, 1.0);
        assert_eq!(a, 1.0);
    }

    #[test]
    fn opens_png_as_rgba8() {
        let path = write_png("open");
        let image = DecodedImage::open(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!((image.width, image.height), (2, 3));
        assert_eq!(image.pixels.len(), 2 * 3 * 4);
        // Pixel (1, 2).
        let i = (2 * 2 + 1) * 4;
        assert_eq!(&image.pixels[i..i + 4], &[100, 100, 255, 255]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = DecodedImage::open("definitely/not/here.png").unwrap_err();
        assert!(matches!(err, Error::Texture { .. }));
        assert!(err.to_string().contains("here.png"));
    }

    #[test]
    fn loader_delivers_once() {
        let path = write_png("loader");
        let mut loader = TextureLoader::spawn(&path);

        let status = wait(&mut loader);
        std::fs::remove_file(&path).ok();

        assert!(matches!(status, LoadStatus::Ready(ref img) if img.width == 2));
        assert!(matches!(loader.poll(), LoadStatus::Pending));
    }

    #[test]
    fn loader_reports_failure() {
        let mut loader = TextureLoader::spawn("missing/normalMap.png");
        match wait(&mut loader) {
            LoadStatus::Failed(err @ Error::Texture { .. }) => {
                assert!(err.to_string().contains("missing/normalMap.png"));
            }
            other => panic!("expected a decode failure, got {other:?}"),
        }
    }
}
