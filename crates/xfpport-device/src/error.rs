/// Errors raised by device access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeviceError {
    /// Instance id outside `[0, MAX_INSTANCES)`.
    #[error("instance {0} out of range (max {max})", max = crate::ids::MAX_INSTANCES - 1)]
    InstanceOutOfRange(u32),

    /// Register offset outside the 256-byte map.
    #[error("register {0} out of range (max 255)")]
    RegisterOutOfRange(u32),

    /// Pin index outside the seven XFP pins.
    #[error("pin {0} out of range (max {max})", max = crate::ids::PIN_COUNT - 1)]
    PinOutOfRange(u32),
}

pub type Result<T> = std::result::Result<T, DeviceError>;
