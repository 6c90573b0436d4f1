use std::{ptr::null_mut, time::Instant};

use custos::{Buffer, CUDA};
use nvjpeg_sys::{
    cudaStream_t, nvjpegEncodeImage, nvjpegEncodeRetrieveBitstream, nvjpegEncodeYUV,
    nvjpegImage_t, nvjpegInputFormat_t, nvjpegInputFormat_t_NVJPEG_INPUT_RGB,
    nvjpegInputFormat_t_NVJPEG_INPUT_RGBI,
};
use tracing::{debug, info, trace};

use crate::{
    bitstream::{append_alpha, EncodedImage},
    config::EncoderConfig,
    error::{EncodeError, Result, ToNVJpegResult},
    format::Encoding,
    image::ImageRef,
    kernels::{cu_pixels_to_planar, cu_pixels_to_rgbi, Conversion},
    nvjpeg::{library_version, EncoderParams, EncoderState, JpegHandle},
    options::{EncodeOptions, Subsampling},
    EncoderInfo, EncoderStats,
};

/// A single nvJPEG encoder bound to one CUDA device and its stream.
///
/// Frames are encoded one at a time. The CUDA context is bound to the thread that
/// opened the device, so create one encoder per encoding thread.
pub struct Encoder {
    // dropped in declaration order: the nvJPEG objects go before the device
    params: EncoderParams,
    state: EncoderState,
    handle: JpegHandle,
    device: CUDA,
    config: EncoderConfig,
    stats: EncoderStats,
}

impl Encoder {
    pub fn new(config: EncoderConfig) -> Result<Self> {
        let device =
            CUDA::new(config.device_index).map_err(|e| EncodeError::Cuda(e.to_string()))?;
        Self::with_device(device, config)
    }

    pub fn with_device(device: CUDA, config: EncoderConfig) -> Result<Self> {
        let stream = device.stream().0 as cudaStream_t;

        let handle = JpegHandle::new_simple()?;
        let state = EncoderState::new(&handle, stream)?;
        let params = EncoderParams::new(&handle, stream)?;

        let device_index = config.device_index;
        match library_version() {
            Ok(version) => info!("nvJPEG {version} encoder opened on CUDA device {device_index}"),
            Err(err) => info!("nvJPEG encoder opened on CUDA device {device_index} ({err})"),
        }

        Ok(Encoder {
            params,
            state,
            handle,
            device,
            config,
            stats: EncoderStats::default(),
        })
    }

    #[inline]
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn info(&self) -> EncoderInfo {
        EncoderInfo {
            version: library_version().ok(),
            device_index: self.config.device_index,
            encodings: Encoding::ALL.to_vec(),
            stats: self.stats,
        }
    }

    /// Converts, compresses and downloads one frame.
    pub fn encode(
        &mut self,
        encoding: Encoding,
        image: &ImageRef,
        options: &EncodeOptions,
    ) -> Result<EncodedImage> {
        if !encoding.accepts(image.format()) {
            return Err(EncodeError::FormatMismatch {
                encoding,
                format: image.format(),
            });
        }

        let start = Instant::now();
        let (width, height) = options.output_size(image)?;
        let quality = options.quality();
        let subsampling = options.subsampling();
        let conv = Conversion {
            src_width: image.width() as usize,
            src_height: image.height() as usize,
            src_stride: image.stride() as usize,
            dst_width: width as usize,
            dst_height: height as usize,
            offsets: image.format().channel_offsets(),
        };

        self.params.set_quality(quality, self.stream())?;
        self.params
            .set_optimized_huffman(options.optimized_huffman(), self.stream())?;

        let (data, alpha_offset) = match encoding {
            Encoding::Jpeg => (self.encode_rgbi(image, &conv, subsampling)?, None),
            Encoding::Jpega => {
                let (data, offset) = self.encode_planar_with_alpha(image, &conv, subsampling)?;
                (data, Some(offset))
            }
        };

        self.stats.frames += 1;
        self.stats.bytes_in += image.bytes().len() as u64;
        self.stats.bytes_out += data.len() as u64;

        debug!(
            "{encoding}: {}x{} -> {width}x{height} q={quality} css={subsampling}, {} bytes in {:?}",
            image.width(),
            image.height(),
            data.len(),
            start.elapsed()
        );

        Ok(EncodedImage {
            encoding,
            width,
            height,
            quality,
            subsampling,
            data,
            alpha_offset,
        })
    }

    #[inline]
    fn stream(&self) -> cudaStream_t {
        self.device.stream().0 as cudaStream_t
    }

    #[inline]
    fn sync(&self) -> Result<()> {
        self.device
            .stream()
            .sync()
            .map_err(|e| EncodeError::Cuda(e.to_string()))
    }

    fn upload<'a>(&'a self, image: &ImageRef) -> Buffer<'a, u8, CUDA> {
        let mut src = Buffer::<u8, _>::new(&self.device, image.bytes().len());
        src.write(image.bytes());
        src
    }

    fn encode_rgbi(
        &self,
        image: &ImageRef,
        conv: &Conversion,
        subsampling: Subsampling,
    ) -> Result<Vec<u8>> {
        self.params.set_sampling_factors(subsampling, self.stream())?;

        let src = self.upload(image);
        let mut rgb = Buffer::<u8, _>::new(&self.device, conv.dst_width * conv.dst_height * 3);
        cu_pixels_to_rgbi(&self.device, &src, &mut rgb, conv)?;

        let mut source = nvjpegImage_t::new();
        source.channel[0] = rgb.cu_ptr() as *mut _;
        source.pitch[0] = conv.dst_width * 3;

        self.encode_image(&source, nvjpegInputFormat_t_NVJPEG_INPUT_RGBI, conv)?;
        self.retrieve_bitstream()
    }

    fn encode_planar_with_alpha(
        &self,
        image: &ImageRef,
        conv: &Conversion,
        subsampling: Subsampling,
    ) -> Result<(Vec<u8>, usize)> {
        let plane_len = conv.dst_width * conv.dst_height;
        let src = self.upload(image);
        let mut planes = [
            Buffer::<u8, _>::new(&self.device, plane_len),
            Buffer::<u8, _>::new(&self.device, plane_len),
            Buffer::<u8, _>::new(&self.device, plane_len),
            Buffer::<u8, _>::new(&self.device, plane_len),
        ];
        cu_pixels_to_planar(&self.device, &src, &mut planes, conv)?;

        let mut source = nvjpegImage_t::new();
        for (idx, plane) in planes.iter().enumerate().take(3) {
            source.channel[idx] = plane.cu_ptr() as *mut _;
            source.pitch[idx] = conv.dst_width;
        }

        self.params.set_sampling_factors(subsampling, self.stream())?;
        self.encode_image(&source, nvjpegInputFormat_t_NVJPEG_INPUT_RGB, conv)?;
        let color = self.retrieve_bitstream()?;

        // second pass: the alpha plane is handed over as the luma of a grayscale image
        let mut alpha = nvjpegImage_t::new();
        alpha.channel[0] = planes[3].cu_ptr() as *mut _;
        alpha.pitch[0] = conv.dst_width;

        self.params.set_sampling_factors(Subsampling::Gray, self.stream())?;
        unsafe {
            nvjpegEncodeYUV(
                self.handle.as_raw(),
                self.state.as_raw(),
                self.params.as_raw(),
                &alpha,
                Subsampling::Gray.to_nvjpeg(),
                conv.dst_width as i32,
                conv.dst_height as i32,
                self.stream(),
            )
            .check("nvjpegEncodeYUV")?;
        }
        let alpha = self.retrieve_bitstream()?;

        Ok(append_alpha(color, &alpha))
    }

    fn encode_image(
        &self,
        source: &nvjpegImage_t,
        input_format: nvjpegInputFormat_t,
        conv: &Conversion,
    ) -> Result<()> {
        unsafe {
            nvjpegEncodeImage(
                self.handle.as_raw(),
                self.state.as_raw(),
                self.params.as_raw(),
                source,
                input_format,
                conv.dst_width as i32,
                conv.dst_height as i32,
                self.stream(),
            )
            .check("nvjpegEncodeImage")
        }
    }

    fn retrieve_bitstream(&self) -> Result<Vec<u8>> {
        let mut length = 0;
        unsafe {
            nvjpegEncodeRetrieveBitstream(
                self.handle.as_raw(),
                self.state.as_raw(),
                null_mut(),
                &mut length,
                self.stream(),
            )
            .check("nvjpegEncodeRetrieveBitstream")?;
        }
        self.sync()?;

        let mut data = vec![0u8; length];
        unsafe {
            nvjpegEncodeRetrieveBitstream(
                self.handle.as_raw(),
                self.state.as_raw(),
                data.as_mut_ptr(),
                &mut length,
                self.stream(),
            )
            .check("nvjpegEncodeRetrieveBitstream")?;
        }
        self.sync()?;
        data.truncate(length);

        trace!("retrieved {length} byte bitstream");
        Ok(data)
    }
}
