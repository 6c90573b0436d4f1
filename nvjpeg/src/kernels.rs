//! Pixel conversion kernels, compiled at runtime by custos through NVRTC.

use custos::{
    cuda::{api::culaunch_kernel, fn_cache, AsCudaCvoidPtr},
    prelude::CUBuffer,
    CUDA,
};

use crate::{
    error::{EncodeError, Result},
    format::ChannelOffsets,
};

const THREADS: u32 = 16;

const PIXELS_TO_RGBI: &str = r#"
    extern "C" __global__ void pixelsToRGBI(const unsigned char* src, unsigned char* dst, size_t srcWidth, size_t srcHeight, size_t srcStride, size_t dstWidth, size_t dstHeight, size_t rOffset, size_t gOffset, size_t bOffset) {
        size_t x = blockDim.x * blockIdx.x + threadIdx.x;
        size_t y = blockDim.y * blockIdx.y + threadIdx.y;

        if (x >= dstWidth || y >= dstHeight) {
            return;
        }

        size_t sx = x * srcWidth / dstWidth;
        size_t sy = y * srcHeight / dstHeight;
        const unsigned char* pixel = src + sy * srcStride + sx * 4;

        unsigned char* out = dst + (y * dstWidth + x) * 3;
        out[0] = pixel[rOffset];
        out[1] = pixel[gOffset];
        out[2] = pixel[bOffset];
    }
"#;

const PIXELS_TO_PLANAR: &str = r#"
    extern "C" __global__ void pixelsToPlanar(const unsigned char* src, unsigned char* r, unsigned char* g, unsigned char* b, unsigned char* a, size_t srcWidth, size_t srcHeight, size_t srcStride, size_t dstWidth, size_t dstHeight, size_t rOffset, size_t gOffset, size_t bOffset, size_t aOffset) {
        size_t x = blockDim.x * blockIdx.x + threadIdx.x;
        size_t y = blockDim.y * blockIdx.y + threadIdx.y;

        if (x >= dstWidth || y >= dstHeight) {
            return;
        }

        size_t sx = x * srcWidth / dstWidth;
        size_t sy = y * srcHeight / dstHeight;
        const unsigned char* pixel = src + sy * srcStride + sx * 4;

        size_t idx = y * dstWidth + x;
        r[idx] = pixel[rOffset];
        g[idx] = pixel[gOffset];
        b[idx] = pixel[bOffset];
        a[idx] = pixel[aOffset];
    }
"#;

/// Geometry of the source pixels and the converted output.
#[derive(Debug, Clone, Copy)]
pub struct Conversion {
    pub src_width: usize,
    pub src_height: usize,
    pub src_stride: usize,
    pub dst_width: usize,
    pub dst_height: usize,
    pub offsets: ChannelOffsets,
}

impl Conversion {
    fn grid(&self) -> [u32; 3] {
        let grid_x = (self.dst_width as f32 / THREADS as f32).ceil() as u32;
        let grid_y = (self.dst_height as f32 / THREADS as f32).ceil() as u32;
        [grid_x, grid_y, 1]
    }
}

/// Compiles (or fetches from the device's cache) `fn_name` and launches it on the device stream.
fn launch_kernel(
    device: &CUDA,
    grid: [u32; 3],
    blocks: [u32; 3],
    src: &str,
    fn_name: &str,
    args: &[&dyn AsCudaCvoidPtr],
) -> Result<()> {
    let func = fn_cache(device, src, fn_name).map_err(|e| EncodeError::Cuda(e.to_string()))?;
    let params = args.iter().map(|arg| arg.as_cvoid_ptr()).collect::<Vec<_>>();
    culaunch_kernel(&func, grid, blocks, device.stream(), &params)
        .map_err(|e| EncodeError::Cuda(e.to_string()))
}

/// Converts 32 bit pixels in `src` into packed RGB in `out`.
pub fn cu_pixels_to_rgbi(
    device: &CUDA,
    src: &CUBuffer<u8>,
    out: &mut CUBuffer<u8>,
    conv: &Conversion,
) -> Result<()> {
    launch_kernel(
        device,
        conv.grid(),
        [THREADS, THREADS, 1],
        PIXELS_TO_RGBI,
        "pixelsToRGBI",
        &[
            src,
            out,
            &conv.src_width,
            &conv.src_height,
            &conv.src_stride,
            &conv.dst_width,
            &conv.dst_height,
            &conv.offsets.r,
            &conv.offsets.g,
            &conv.offsets.b,
        ],
    )
}

/// Converts 32 bit pixels in `src` into four planes, alpha last.
pub fn cu_pixels_to_planar(
    device: &CUDA,
    src: &CUBuffer<u8>,
    planes: &mut [CUBuffer<u8>; 4],
    conv: &Conversion,
) -> Result<()> {
    let [r, g, b, a] = planes;
    launch_kernel(
        device,
        conv.grid(),
        [THREADS, THREADS, 1],
        PIXELS_TO_PLANAR,
        "pixelsToPlanar",
        &[
            src,
            r,
            g,
            b,
            a,
            &conv.src_width,
            &conv.src_height,
            &conv.src_stride,
            &conv.dst_width,
            &conv.dst_height,
            &conv.offsets.r,
            &conv.offsets.g,
            &conv.offsets.b,
            &conv.offsets.a,
        ],
    )
}
