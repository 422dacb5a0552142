use crate::error::Result;
use crate::ids::{
    byte_value, InstanceId, Pin, RegisterAddr, MAX_INSTANCES, PIN_COUNT, REGISTER_COUNT,
};
use crate::image::DEFAULT_IMAGE;

/// State of one emulated transceiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInstance {
    pins: [u8; PIN_COUNT],
    registers: [u8; REGISTER_COUNT],
}

impl DeviceInstance {
    fn reset(&mut self) {
        self.pins = [0; PIN_COUNT];
        self.registers = DEFAULT_IMAGE;
    }

    pub fn register(&self, addr: RegisterAddr) -> u8 {
        self.registers[addr.index()]
    }

    pub fn pin(&self, pin: Pin) -> u8 {
        self.pins[pin.index()]
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.registers
    }

    pub fn pins(&self) -> &[u8; PIN_COUNT] {
        &self.pins
    }
}

impl Default for DeviceInstance {
    fn default() -> Self {
        Self {
            pins: [0; PIN_COUNT],
            registers: DEFAULT_IMAGE,
        }
    }
}

/// Fixed arena of every emulated transceiver.
///
/// All [`MAX_INSTANCES`] instances exist for the registry's whole lifetime;
/// they are reset, never created or destroyed. Accessors take raw wire values
/// and reject anything out of range before touching state, so a failed call
/// never changes the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRegistry {
    instances: Vec<DeviceInstance>,
}

impl DeviceRegistry {
    /// A registry with every instance in its reset state.
    pub fn new() -> Self {
        Self {
            instances: vec![DeviceInstance::default(); MAX_INSTANCES],
        }
    }

    /// Reload the default register image into every instance and clear all pins.
    pub fn reset_all(&mut self) {
        for instance in &mut self.instances {
            instance.reset();
        }
        tracing::debug!(instances = MAX_INSTANCES, "device registry reset");
    }

    pub fn instance(&self, id: InstanceId) -> &DeviceInstance {
        &self.instances[id.index()]
    }

    fn instance_mut(&mut self, id: InstanceId) -> &mut DeviceInstance {
        &mut self.instances[id.index()]
    }

    pub fn get_register(&self, instance: u32, register: u32) -> Result<u8> {
        let id = InstanceId::new(instance)?;
        let addr = RegisterAddr::new(register)?;
        Ok(self.instance(id).register(addr))
    }

    pub fn set_register(&mut self, instance: u32, register: u32, value: u32) -> Result<()> {
        let id = InstanceId::new(instance)?;
        let addr = RegisterAddr::new(register)?;
        let value = byte_value(value);

        self.instance_mut(id).registers[addr.index()] = value;
        tracing::trace!(%id, register = addr.index(), value, "register written");
        Ok(())
    }

    pub fn get_pin(&self, instance: u32, pin: u32) -> Result<u8> {
        let id = InstanceId::new(instance)?;
        let pin = Pin::new(pin)?;
        Ok(self.instance(id).pin(pin))
    }

    pub fn set_pin(&mut self, instance: u32, pin: u32, value: u32) -> Result<()> {
        let id = InstanceId::new(instance)?;
        let pin = Pin::new(pin)?;
        let value = byte_value(value);

        self.instance_mut(id).pins[pin.index()] = value;
        tracing::trace!(%id, %pin, value, "pin written");
        Ok(())
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeviceError;
    use crate::image::{vendor_field, VendorField};

    #[test]
    fn new_registry_is_reset() {
        let registry = DeviceRegistry::new();
        for id in InstanceId::all() {
            assert_eq!(registry.instance(id).registers(), &DEFAULT_IMAGE);
            assert_eq!(registry.instance(id).pins(), &[0; PIN_COUNT]);
        }
    }

    #[test]
    fn reads_default_image_everywhere() {
        let registry = DeviceRegistry::new();
        for instance in 0..MAX_INSTANCES as u32 {
            for register in 0..REGISTER_COUNT as u32 {
                assert_eq!(
                    registry.get_register(instance, register).unwrap(),
                    DEFAULT_IMAGE[register as usize]
                );
            }
        }
    }

    #[test]
    fn register_write_then_read() {
        let mut registry = DeviceRegistry::new();
        registry.set_register(0, 10, 0x42).unwrap();

        assert_eq!(registry.get_register(0, 10).unwrap(), 0x42);
        // Neighbours and other instances are untouched.
        assert_eq!(registry.get_register(0, 11).unwrap(), DEFAULT_IMAGE[11]);
        assert_eq!(registry.get_register(1, 10).unwrap(), DEFAULT_IMAGE[10]);
    }

    #[test]
    fn pin_write_then_read() {
        let mut registry = DeviceRegistry::new();
        assert_eq!(registry.get_pin(5, 3).unwrap(), 0);

        registry.set_pin(5, 3, 1).unwrap();
        assert_eq!(registry.get_pin(5, 3).unwrap(), 1);
        let instance = registry.instance(InstanceId::new(5).unwrap());
        assert_eq!(instance.pin(Pin::NotReady), 1);
        assert_eq!(registry.get_pin(5, 2).unwrap(), 0);
    }

    #[test]
    fn reset_all_restores_image_and_clears_pins() {
        let mut registry = DeviceRegistry::new();
        registry.set_register(7, 148, b'X' as u32).unwrap();
        registry.set_pin(19, 6, 0xFF).unwrap();

        registry.reset_all();

        assert_eq!(registry, DeviceRegistry::new());
        let instance = registry.instance(InstanceId::new(7).unwrap());
        assert_eq!(
            vendor_field(instance.registers(), VendorField::Name),
            b"VENDOR NAME  XFP"
        );
    }

    #[test]
    fn out_of_range_access_is_rejected() {
        let mut registry = DeviceRegistry::new();
        let before = registry.clone();

        assert_eq!(
            registry.get_register(25, 0).unwrap_err(),
            DeviceError::InstanceOutOfRange(25)
        );
        assert_eq!(
            registry.set_register(20, 0, 1).unwrap_err(),
            DeviceError::InstanceOutOfRange(20)
        );
        assert_eq!(
            registry.set_register(0, 256, 1).unwrap_err(),
            DeviceError::RegisterOutOfRange(256)
        );
        assert_eq!(
            registry.get_pin(0, 7).unwrap_err(),
            DeviceError::PinOutOfRange(7)
        );
        assert_eq!(
            registry.set_pin(0, 1000, 1).unwrap_err(),
            DeviceError::PinOutOfRange(1000)
        );

        assert_eq!(registry, before);
    }

    #[test]
    fn wide_values_are_narrowed_to_a_byte() {
        let mut registry = DeviceRegistry::new();

        registry.set_register(0, 10, 0x1FF).unwrap();
        registry.set_pin(4, 2, 0x100).unwrap();

        assert_eq!(registry.get_register(0, 10).unwrap(), 0xFF);
        assert_eq!(registry.get_pin(4, 2).unwrap(), 0x00);
    }

    #[test]
    fn instance_checked_before_register() {
        let registry = DeviceRegistry::new();
        assert_eq!(
            registry.get_register(99, 999).unwrap_err(),
            DeviceError::InstanceOutOfRange(99)
        );
    }
}
