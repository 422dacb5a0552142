//! Validated coordinates into device state.
//!
//! Wire values are `u32`; nothing indexes storage until it has passed through
//! one of these constructors.

use std::fmt;

use crate::error::{DeviceError, Result};

/// Number of emulated transceivers.
pub const MAX_INSTANCES: usize = 20;

/// Size of each transceiver's register map.
pub const REGISTER_COUNT: usize = 256;

/// Number of control/status pins per transceiver.
pub const PIN_COUNT: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(u8);

impl InstanceId {
    pub fn new(raw: u32) -> Result<Self> {
        if (raw as usize) < MAX_INSTANCES {
            Ok(Self(raw as u8))
        } else {
            Err(DeviceError::InstanceOutOfRange(raw))
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Every valid instance, in order.
    pub fn all() -> impl Iterator<Item = InstanceId> {
        (0..MAX_INSTANCES as u8).map(InstanceId)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "xfp{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegisterAddr(u8);

impl RegisterAddr {
    pub fn new(raw: u32) -> Result<Self> {
        u8::try_from(raw)
            .map(Self)
            .map_err(|_| DeviceError::RegisterOutOfRange(raw))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// XFP module pins, in wire index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pin {
    /// Module deselect (`Mod_DeSel`).
    ModDeselect = 0,
    /// Transmitter disable (`TX_DIS`).
    TxDisable = 1,
    /// Module present (`Mod_ABS`, inverted).
    Presence = 2,
    /// Module not ready (`Mod_NR`).
    NotReady = 3,
    /// Receiver loss of signal (`RX_LOS`).
    RxLos = 4,
    /// Module reset (`P_Down/RST` reset function).
    Reset = 5,
    /// Power down (`P_Down/RST` power-down function).
    PowerDown = 6,
}

impl Pin {
    pub const ALL: [Pin; PIN_COUNT] = [
        Pin::ModDeselect,
        Pin::TxDisable,
        Pin::Presence,
        Pin::NotReady,
        Pin::RxLos,
        Pin::Reset,
        Pin::PowerDown,
    ];

    pub fn new(raw: u32) -> Result<Self> {
        Self::ALL
            .get(raw as usize)
            .copied()
            .ok_or(DeviceError::PinOutOfRange(raw))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Pin::ModDeselect => "mod_desel",
            Pin::TxDisable => "tx_dis",
            Pin::Presence => "presence",
            Pin::NotReady => "not_ready",
            Pin::RxLos => "rx_los",
            Pin::Reset => "reset",
            Pin::PowerDown => "power_down",
        }
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Narrow a wire value to the byte stored in a register or pin.
///
/// Registers and pins are 8 bits wide; only the low byte is kept.
pub(crate) fn byte_value(raw: u32) -> u8 {
    (raw & 0xFF) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_bounds() {
        assert_eq!(InstanceId::new(0).unwrap().index(), 0);
        assert_eq!(InstanceId::new(19).unwrap().index(), 19);
        assert_eq!(
            InstanceId::new(20).unwrap_err(),
            DeviceError::InstanceOutOfRange(20)
        );
        assert_eq!(
            InstanceId::new(u32::MAX).unwrap_err(),
            DeviceError::InstanceOutOfRange(u32::MAX)
        );
    }

    #[test]
    fn all_instances_are_listed_once() {
        let ids: Vec<usize> = InstanceId::all().map(InstanceId::index).collect();
        assert_eq!(ids, (0..MAX_INSTANCES).collect::<Vec<_>>());
    }

    #[test]
    fn register_bounds() {
        assert_eq!(RegisterAddr::new(255).unwrap().index(), 255);
        assert_eq!(
            RegisterAddr::new(256).unwrap_err(),
            DeviceError::RegisterOutOfRange(256)
        );
    }

    #[test]
    fn pin_indices_follow_wire_order() {
        for (i, pin) in Pin::ALL.iter().enumerate() {
            assert_eq!(pin.index(), i);
            assert_eq!(Pin::new(i as u32).unwrap(), *pin);
        }
        assert_eq!(Pin::new(7).unwrap_err(), DeviceError::PinOutOfRange(7));
        assert_eq!(Pin::new(3).unwrap().name(), "not_ready");
    }

    #[test]
    fn values_keep_the_low_byte() {
        assert_eq!(byte_value(0x42), 0x42);
        assert_eq!(byte_value(0xFF), 0xFF);
        assert_eq!(byte_value(0x100), 0x00);
        assert_eq!(byte_value(0x1FF), 0xFF);
        assert_eq!(byte_value(70_000), 0x70);
    }

    #[test]
    fn error_messages_name_limits() {
        assert_eq!(
            DeviceError::InstanceOutOfRange(25).to_string(),
            "instance 25 out of range (max 19)"
        );
        assert_eq!(
            DeviceError::PinOutOfRange(9).to_string(),
            "pin 9 out of range (max 6)"
        );
    }
}
