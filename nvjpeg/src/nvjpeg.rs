use std::ptr::null_mut;

use nvjpeg_sys::{
    cudaStream_t, libraryPropertyType_MAJOR_VERSION, libraryPropertyType_MINOR_VERSION,
    libraryPropertyType_PATCH_LEVEL, nvjpegCreateSimple, nvjpegEncoderParamsCreate,
    nvjpegEncoderParamsDestroy, nvjpegEncoderParamsSetOptimizedHuffman,
    nvjpegEncoderParamsSetQuality, nvjpegEncoderParamsSetSamplingFactors,
    nvjpegEncoderParams_t, nvjpegEncoderStateCreate, nvjpegEncoderStateDestroy,
    nvjpegEncoderState_t, nvjpegGetProperty, nvjpegHandle_t,
};

use crate::{
    error::{Result, ToNVJpegResult},
    options::Subsampling,
    LibraryVersion,
};

/// Reads the version of the loaded libnvjpeg.
pub fn library_version() -> Result<LibraryVersion> {
    let mut version = [0; 3];
    let properties = [
        libraryPropertyType_MAJOR_VERSION,
        libraryPropertyType_MINOR_VERSION,
        libraryPropertyType_PATCH_LEVEL,
    ];
    for (property, value) in properties.into_iter().zip(version.iter_mut()) {
        unsafe {
            nvjpegGetProperty(property, value).check("nvjpegGetProperty")?;
        }
    }
    let [major, minor, patch] = version;
    Ok(LibraryVersion {
        major,
        minor,
        patch,
    })
}

#[derive(Debug)]
pub struct JpegHandle {
    inner: nvjpegHandle_t,
}

impl JpegHandle {
    #[inline]
    pub fn new_simple() -> Result<Self> {
        let mut inner = null_mut();
        unsafe {
            nvjpegCreateSimple(&mut inner).check("nvjpegCreateSimple")?;
        }

        Ok(JpegHandle { inner })
    }

    #[inline]
    pub fn as_raw(&self) -> nvjpegHandle_t {
        self.inner
    }
}

impl Drop for JpegHandle {
    fn drop(&mut self) {
        unsafe {
            nvjpeg_sys::nvjpegDestroy(self.inner);
        }
    }
}

/// Scratch memory and the last bitstream of an encode call.
#[derive(Debug)]
pub struct EncoderState {
    inner: nvjpegEncoderState_t,
}

impl EncoderState {
    #[inline]
    pub fn new(handle: &JpegHandle, stream: cudaStream_t) -> Result<Self> {
        let mut inner = null_mut();
        unsafe {
            nvjpegEncoderStateCreate(handle.as_raw(), &mut inner, stream)
                .check("nvjpegEncoderStateCreate")?;
        }
        Ok(EncoderState { inner })
    }

    #[inline]
    pub fn as_raw(&self) -> nvjpegEncoderState_t {
        self.inner
    }
}

impl Drop for EncoderState {
    fn drop(&mut self) {
        unsafe {
            nvjpegEncoderStateDestroy(self.inner);
        }
    }
}

#[derive(Debug)]
pub struct EncoderParams {
    inner: nvjpegEncoderParams_t,
}

impl EncoderParams {
    #[inline]
    pub fn new(handle: &JpegHandle, stream: cudaStream_t) -> Result<Self> {
        let mut inner = null_mut();
        unsafe {
            nvjpegEncoderParamsCreate(handle.as_raw(), &mut inner, stream)
                .check("nvjpegEncoderParamsCreate")?;
        }
        Ok(EncoderParams { inner })
    }

    #[inline]
    pub fn as_raw(&self) -> nvjpegEncoderParams_t {
        self.inner
    }

    pub fn set_quality(&self, quality: u8, stream: cudaStream_t) -> Result<()> {
        unsafe {
            nvjpegEncoderParamsSetQuality(self.inner, quality as i32, stream)
                .check("nvjpegEncoderParamsSetQuality")
        }
    }

    pub fn set_sampling_factors(
        &self,
        subsampling: Subsampling,
        stream: cudaStream_t,
    ) -> Result<()> {
        unsafe {
            nvjpegEncoderParamsSetSamplingFactors(self.inner, subsampling.to_nvjpeg(), stream)
                .check("nvjpegEncoderParamsSetSamplingFactors")
        }
    }

    pub fn set_optimized_huffman(&self, optimized: bool, stream: cudaStream_t) -> Result<()> {
        unsafe {
            nvjpegEncoderParamsSetOptimizedHuffman(self.inner, optimized as i32, stream)
                .check("nvjpegEncoderParamsSetOptimizedHuffman")
        }
    }
}

impl Drop for EncoderParams {
    fn drop(&mut self) {
        unsafe {
            nvjpegEncoderParamsDestroy(self.inner);
        }
    }
}
