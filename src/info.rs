//! Typed info queries.
//!
//! Every OpenCL object exposes a `clGet*Info` entry point with the same calling convention:
//! ask for the size first, then fill a buffer of that size. [`InfoSource`] captures that entry
//! point once per object kind, and [`InfoValue`] turns the returned bytes into a scalar, a string
//! or a list.

use core::{ffi::c_void, mem::size_of};
use opencl_sys::{cl_int, cl_bool, cl_uint};
use crate::error::{Error, Result};

/// An object that can be queried with a `clGet*Info` style function.
pub trait InfoSource {
    type Param: Copy + Into<cl_uint>;

    /// Raw native query.
    /// # Safety
    /// `value` must be null or point to at least `size` writable bytes, and `size_ret` must be null or valid.
    unsafe fn raw_info (&self, param: Self::Param, size: usize, value: *mut c_void, size_ret: *mut usize) -> cl_int;

    /// Performs the two-step query and returns the raw bytes.
    fn info_bytes (&self, param: Self::Param) -> Result<Vec<u8>> {
        let mut len = 0;
        unsafe {
            tri!(self.raw_info(param, 0, core::ptr::null_mut(), &mut len));
        }

        let mut result = vec![0u8; len];
        if len > 0 {
            unsafe {
                tri!(self.raw_info(param, len, result.as_mut_ptr().cast(), core::ptr::null_mut()));
            }
        }

        tracing::trace!(param = Into::<cl_uint>::into(param), len, "info query");
        Ok(result)
    }

    #[inline(always)]
    fn get_info<T: InfoValue> (&self, param: Self::Param) -> Result<T> {
        T::from_info(self.info_bytes(param)?)
    }
}

/// A value that can be decoded from the bytes of an info query.
pub trait InfoValue: Sized {
    fn from_info (bytes: Vec<u8>) -> Result<Self>;
}

/// Plain data that may be reinterpreted byte-for-byte from an info query.
/// # Safety
/// Every bit pattern of `size_of::<Self>()` bytes must be a valid `Self`.
pub unsafe trait RawInfo: Copy {}

macro_rules! impl_raw_info {
    ($($t:ty),+) => {
        $(unsafe impl RawInfo for $t {})+
    };
}

impl_raw_info!(u8, u16, u32, u64, i8, i16, i32, i64, usize, isize, f32, f64, *mut c_void, *const c_void);

impl<T: RawInfo> InfoValue for T {
    #[inline]
    fn from_info (bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() != size_of::<T>() {
            return Err(Error::InfoSize { expected: size_of::<T>(), actual: bytes.len() });
        }

        unsafe { Ok(bytes.as_ptr().cast::<T>().read_unaligned()) }
    }
}

impl InfoValue for bool {
    #[inline(always)]
    fn from_info (bytes: Vec<u8>) -> Result<Self> {
        cl_bool::from_info(bytes).map(|x| x != 0)
    }
}

impl InfoValue for String {
    /// Drops exactly one trailing NUL, if any.
    #[inline]
    fn from_info (mut bytes: Vec<u8>) -> Result<Self> {
        if bytes.last() == Some(&0) {
            bytes.pop();
        }

        match String::from_utf8(bytes) {
            Ok(x) => Ok(x),
            Err(e) => Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

impl<T: RawInfo> InfoValue for Vec<T> {
    fn from_info (bytes: Vec<u8>) -> Result<Self> {
        let elem = size_of::<T>();
        if elem == 0 || bytes.len() % elem != 0 {
            return Err(Error::InfoSize { expected: elem, actual: bytes.len() });
        }

        let len = bytes.len() / elem;
        let result = (0..len)
            .map(|i| unsafe { bytes.as_ptr().add(i * elem).cast::<T>().read_unaligned() })
            .collect::<Vec<_>>();

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_trims_single_nul () {
        assert_eq!(String::from_info(b"pocl\0".to_vec()).unwrap(), "pocl");
        assert_eq!(String::from_info(b"pocl".to_vec()).unwrap(), "pocl");
        assert_eq!(String::from_info(b"ab\0\0".to_vec()).unwrap(), "ab\0");
        assert_eq!(String::from_info(Vec::new()).unwrap(), "");
    }

    #[test]
    fn scalar_requires_exact_size () {
        let value = u32::from_info(7u32.to_ne_bytes().to_vec()).unwrap();
        assert_eq!(value, 7);

        match u64::from_info(7u32.to_ne_bytes().to_vec()) {
            Err(Error::InfoSize { expected: 8, actual: 4 }) => {},
            other => panic!("unexpected result {other:?}")
        }
    }

    #[test]
    fn bool_from_cl_bool () {
        assert!(bool::from_info(1u32.to_ne_bytes().to_vec()).unwrap());
        assert!(!bool::from_info(0u32.to_ne_bytes().to_vec()).unwrap());
    }

    #[test]
    fn list_decoding () {
        let bytes = [1usize, 2, 3].iter().flat_map(|x| x.to_ne_bytes()).collect::<Vec<_>>();
        assert_eq!(Vec::<usize>::from_info(bytes).unwrap(), vec![1, 2, 3]);
        assert!(Vec::<u32>::from_info(vec![0u8; 6]).is_err());
        assert!(Vec::<u32>::from_info(Vec::new()).unwrap().is_empty());
    }
}
