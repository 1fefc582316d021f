use opencl_sys::{cl_kernel_arg_address_qualifier, cl_kernel_arg_access_qualifier, cl_kernel_arg_type_qualifier, CL_KERNEL_ARG_ADDRESS_GLOBAL, CL_KERNEL_ARG_ADDRESS_LOCAL, CL_KERNEL_ARG_ADDRESS_CONSTANT, CL_KERNEL_ARG_ADDRESS_PRIVATE, CL_KERNEL_ARG_ACCESS_READ_ONLY, CL_KERNEL_ARG_ACCESS_WRITE_ONLY, CL_KERNEL_ARG_ACCESS_READ_WRITE, CL_KERNEL_ARG_ACCESS_NONE, CL_KERNEL_ARG_TYPE_CONST, CL_KERNEL_ARG_TYPE_RESTRICT, CL_KERNEL_ARG_TYPE_VOLATILE};

/// Address space of a kernel argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum AddrQualifier {
    Global = CL_KERNEL_ARG_ADDRESS_GLOBAL,
    Local = CL_KERNEL_ARG_ADDRESS_LOCAL,
    Constant = CL_KERNEL_ARG_ADDRESS_CONSTANT,
    Private = CL_KERNEL_ARG_ADDRESS_PRIVATE
}

impl AddrQualifier {
    pub const fn from_raw (raw: cl_kernel_arg_address_qualifier) -> Option<Self> {
        match raw {
            CL_KERNEL_ARG_ADDRESS_GLOBAL => Some(Self::Global),
            CL_KERNEL_ARG_ADDRESS_LOCAL => Some(Self::Local),
            CL_KERNEL_ARG_ADDRESS_CONSTANT => Some(Self::Constant),
            CL_KERNEL_ARG_ADDRESS_PRIVATE => Some(Self::Private),
            _ => None
        }
    }
}

impl Default for AddrQualifier {
    #[inline(always)]
    fn default() -> Self {
        Self::Private
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum AccessQualifier {
    ReadOnly = CL_KERNEL_ARG_ACCESS_READ_ONLY,
    WriteOnly = CL_KERNEL_ARG_ACCESS_WRITE_ONLY,
    ReadWrite = CL_KERNEL_ARG_ACCESS_READ_WRITE,
    /// Anything that isn't an image.
    None = CL_KERNEL_ARG_ACCESS_NONE
}

impl AccessQualifier {
    pub const fn from_raw (raw: cl_kernel_arg_access_qualifier) -> Option<Self> {
        match raw {
            CL_KERNEL_ARG_ACCESS_READ_ONLY => Some(Self::ReadOnly),
            CL_KERNEL_ARG_ACCESS_WRITE_ONLY => Some(Self::WriteOnly),
            CL_KERNEL_ARG_ACCESS_READ_WRITE => Some(Self::ReadWrite),
            CL_KERNEL_ARG_ACCESS_NONE => Some(Self::None),
            _ => None
        }
    }
}

bitflags::bitflags! {
    #[repr(transparent)]
    pub struct TypeQualifier: cl_kernel_arg_type_qualifier {
        const CONST = CL_KERNEL_ARG_TYPE_CONST;
        const RESTRICT = CL_KERNEL_ARG_TYPE_RESTRICT;
        const VOLATILE = CL_KERNEL_ARG_TYPE_VOLATILE;
    }
}

impl Default for TypeQualifier {
    #[inline(always)]
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualifiers_from_raw () {
        assert_eq!(AddrQualifier::from_raw(CL_KERNEL_ARG_ADDRESS_LOCAL), Some(AddrQualifier::Local));
        assert_eq!(AddrQualifier::from_raw(0), None);
        assert_eq!(AccessQualifier::from_raw(CL_KERNEL_ARG_ACCESS_NONE), Some(AccessQualifier::None));
        assert_eq!(TypeQualifier::from_bits_truncate(CL_KERNEL_ARG_TYPE_CONST | CL_KERNEL_ARG_TYPE_VOLATILE), TypeQualifier::CONST | TypeQualifier::VOLATILE);
    }
}
