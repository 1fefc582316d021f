use core::fmt::Debug;
use num_traits::Zero;
use crate::info::RawInfo;

/// Element types that can live in device memory, matching an OpenCL C scalar type.
pub trait Scalar: 'static + RawInfo + Zero + PartialEq + Debug + Send + Sync {
    /// Name of the matching OpenCL C type.
    const NAME : &'static str;
}

macro_rules! impl_scalar {
    ($($ty:ty as $name:literal),+) => {
        $(
            impl Scalar for $ty {
                const NAME : &'static str = $name;
            }
        )+
    };
}

impl_scalar! {
    u8 as "uchar",
    i8 as "char",
    u16 as "ushort",
    i16 as "short",
    u32 as "uint",
    i32 as "int",
    u64 as "ulong",
    i64 as "long",
    f32 as "float",
    f64 as "double"
}

#[cfg(test)]
mod tests {
    use super::Scalar;

    #[test]
    fn opencl_names () {
        assert_eq!(<i32 as Scalar>::NAME, "int");
        assert_eq!(<u8 as Scalar>::NAME, "uchar");
        assert_eq!(<f64 as Scalar>::NAME, "double");
    }
}
