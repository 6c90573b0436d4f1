// Hand-maintained subset of nvjpeg.h covering the handle, the encoder state/params
// and the image encode entry points. Layout and values follow nvjpeg.h from CUDA 11+.

use std::os::raw::{c_int, c_uint, c_void};

pub const NVJPEG_MAX_COMPONENT: u32 = 4;

pub type cudaStream_t = *mut c_void;

pub type nvjpegStatus_t = c_uint;
pub const nvjpegStatus_t_NVJPEG_STATUS_SUCCESS: nvjpegStatus_t = 0;
pub const nvjpegStatus_t_NVJPEG_STATUS_NOT_INITIALIZED: nvjpegStatus_t = 1;
pub const nvjpegStatus_t_NVJPEG_STATUS_INVALID_PARAMETER: nvjpegStatus_t = 2;
pub const nvjpegStatus_t_NVJPEG_STATUS_BAD_JPEG: nvjpegStatus_t = 3;
pub const nvjpegStatus_t_NVJPEG_STATUS_JPEG_NOT_SUPPORTED: nvjpegStatus_t = 4;
pub const nvjpegStatus_t_NVJPEG_STATUS_ALLOCATOR_FAILURE: nvjpegStatus_t = 5;
pub const nvjpegStatus_t_NVJPEG_STATUS_EXECUTION_FAILED: nvjpegStatus_t = 6;
pub const nvjpegStatus_t_NVJPEG_STATUS_ARCH_MISMATCH: nvjpegStatus_t = 7;
pub const nvjpegStatus_t_NVJPEG_STATUS_INTERNAL_ERROR: nvjpegStatus_t = 8;
pub const nvjpegStatus_t_NVJPEG_STATUS_IMPLEMENTATION_NOT_SUPPORTED: nvjpegStatus_t = 9;
pub const nvjpegStatus_t_NVJPEG_STATUS_INCOMPLETE_BITSTREAM: nvjpegStatus_t = 10;

pub type nvjpegChromaSubsampling_t = c_int;
pub const nvjpegChromaSubsampling_t_NVJPEG_CSS_444: nvjpegChromaSubsampling_t = 0;
pub const nvjpegChromaSubsampling_t_NVJPEG_CSS_422: nvjpegChromaSubsampling_t = 1;
pub const nvjpegChromaSubsampling_t_NVJPEG_CSS_420: nvjpegChromaSubsampling_t = 2;
pub const nvjpegChromaSubsampling_t_NVJPEG_CSS_440: nvjpegChromaSubsampling_t = 3;
pub const nvjpegChromaSubsampling_t_NVJPEG_CSS_411: nvjpegChromaSubsampling_t = 4;
pub const nvjpegChromaSubsampling_t_NVJPEG_CSS_410: nvjpegChromaSubsampling_t = 5;
pub const nvjpegChromaSubsampling_t_NVJPEG_CSS_GRAY: nvjpegChromaSubsampling_t = 6;
pub const nvjpegChromaSubsampling_t_NVJPEG_CSS_410V: nvjpegChromaSubsampling_t = 7;
pub const nvjpegChromaSubsampling_t_NVJPEG_CSS_UNKNOWN: nvjpegChromaSubsampling_t = -1;

pub type nvjpegInputFormat_t = c_uint;
pub const nvjpegInputFormat_t_NVJPEG_INPUT_RGB: nvjpegInputFormat_t = 3;
pub const nvjpegInputFormat_t_NVJPEG_INPUT_BGR: nvjpegInputFormat_t = 4;
pub const nvjpegInputFormat_t_NVJPEG_INPUT_RGBI: nvjpegInputFormat_t = 5;
pub const nvjpegInputFormat_t_NVJPEG_INPUT_BGRI: nvjpegInputFormat_t = 6;

pub type libraryPropertyType = c_uint;
pub const libraryPropertyType_MAJOR_VERSION: libraryPropertyType = 0;
pub const libraryPropertyType_MINOR_VERSION: libraryPropertyType = 1;
pub const libraryPropertyType_PATCH_LEVEL: libraryPropertyType = 2;

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct nvjpegImage_t {
    pub channel: [*mut u8; NVJPEG_MAX_COMPONENT as usize],
    pub pitch: [usize; NVJPEG_MAX_COMPONENT as usize],
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct nvjpegHandle {
    _unused: [u8; 0],
}
pub type nvjpegHandle_t = *mut nvjpegHandle;

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct nvjpegEncoderState {
    _unused: [u8; 0],
}
pub type nvjpegEncoderState_t = *mut nvjpegEncoderState;

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct nvjpegEncoderParams {
    _unused: [u8; 0],
}
pub type nvjpegEncoderParams_t = *mut nvjpegEncoderParams;

extern "C" {
    pub fn nvjpegGetProperty(type_: libraryPropertyType, value: *mut c_int) -> nvjpegStatus_t;

    pub fn nvjpegCreateSimple(handle: *mut nvjpegHandle_t) -> nvjpegStatus_t;
    pub fn nvjpegDestroy(handle: nvjpegHandle_t) -> nvjpegStatus_t;

    pub fn nvjpegEncoderStateCreate(
        handle: nvjpegHandle_t,
        jpeg_state: *mut nvjpegEncoderState_t,
        stream: cudaStream_t,
    ) -> nvjpegStatus_t;
    pub fn nvjpegEncoderStateDestroy(jpeg_state: nvjpegEncoderState_t) -> nvjpegStatus_t;

    pub fn nvjpegEncoderParamsCreate(
        handle: nvjpegHandle_t,
        jpeg_params: *mut nvjpegEncoderParams_t,
        stream: cudaStream_t,
    ) -> nvjpegStatus_t;
    pub fn nvjpegEncoderParamsDestroy(jpeg_params: nvjpegEncoderParams_t) -> nvjpegStatus_t;

    pub fn nvjpegEncoderParamsSetQuality(
        jpeg_params: nvjpegEncoderParams_t,
        quality: c_int,
        stream: cudaStream_t,
    ) -> nvjpegStatus_t;
    pub fn nvjpegEncoderParamsSetOptimizedHuffman(
        jpeg_params: nvjpegEncoderParams_t,
        optimized: c_int,
        stream: cudaStream_t,
    ) -> nvjpegStatus_t;
    pub fn nvjpegEncoderParamsSetSamplingFactors(
        jpeg_params: nvjpegEncoderParams_t,
        chroma_subsampling: nvjpegChromaSubsampling_t,
        stream: cudaStream_t,
    ) -> nvjpegStatus_t;

    pub fn nvjpegEncodeYUV(
        handle: nvjpegHandle_t,
        encoder_state: nvjpegEncoderState_t,
        encode_params: nvjpegEncoderParams_t,
        source: *const nvjpegImage_t,
        chroma_subsampling: nvjpegChromaSubsampling_t,
        image_width: c_int,
        image_height: c_int,
        stream: cudaStream_t,
    ) -> nvjpegStatus_t;
    pub fn nvjpegEncodeImage(
        handle: nvjpegHandle_t,
        encoder_state: nvjpegEncoderState_t,
        encode_params: nvjpegEncoderParams_t,
        source: *const nvjpegImage_t,
        input_format: nvjpegInputFormat_t,
        image_width: c_int,
        image_height: c_int,
        stream: cudaStream_t,
    ) -> nvjpegStatus_t;
    pub fn nvjpegEncodeRetrieveBitstream(
        handle: nvjpegHandle_t,
        encoder_state: nvjpegEncoderState_t,
        data: *mut u8,
        length: *mut usize,
        stream: cudaStream_t,
    ) -> nvjpegStatus_t;
}
