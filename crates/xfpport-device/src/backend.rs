use crate::error::Result;
use crate::registry::DeviceRegistry;

/// Access to XFP transceivers, whether emulated or real.
///
/// Coordinates arrive exactly as decoded from the wire; each backend is
/// responsible for rejecting out-of-range instances, registers and pins with a
/// [`DeviceError`](crate::DeviceError) rather than clamping them. Written
/// values keep only their low byte.
pub trait XfpBackend {
    /// Short label for logs.
    fn name(&self) -> &'static str;

    /// Bring every transceiver to its power-up state.
    fn open(&mut self) -> Result<()>;

    /// Release the hardware. Transceiver state is kept.
    fn close(&mut self) -> Result<()>;

    fn read_register(&mut self, instance: u32, register: u32) -> Result<u8>;

    fn write_register(&mut self, instance: u32, register: u32, value: u32) -> Result<()>;

    fn read_pin(&mut self, instance: u32, pin: u32) -> Result<u8>;

    fn write_pin(&mut self, instance: u32, pin: u32, value: u32) -> Result<()>;
}

/// The emulated backend: registers and pins live in memory.
impl XfpBackend for DeviceRegistry {
    fn name(&self) -> &'static str {
        "emulated"
    }

    fn open(&mut self) -> Result<()> {
        self.reset_all();
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn read_register(&mut self, instance: u32, register: u32) -> Result<u8> {
        self.get_register(instance, register)
    }

    fn write_register(&mut self, instance: u32, register: u32, value: u32) -> Result<()> {
        self.set_register(instance, register, value)
    }

    fn read_pin(&mut self, instance: u32, pin: u32) -> Result<u8> {
        self.get_pin(instance, pin)
    }

    fn write_pin(&mut self, instance: u32, pin: u32, value: u32) -> Result<()> {
        self.set_pin(instance, pin, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeviceError;
    use crate::image::DEFAULT_IMAGE;

    fn backend() -> Box<dyn XfpBackend> {
        Box::new(DeviceRegistry::new())
    }

    #[test]
    fn open_discards_previous_writes() {
        let mut backend = backend();
        backend.write_register(3, 0, 0x99).unwrap();
        backend.write_pin(3, 4, 1).unwrap();

        backend.open().unwrap();

        assert_eq!(backend.read_register(3, 0).unwrap(), DEFAULT_IMAGE[0]);
        assert_eq!(backend.read_pin(3, 4).unwrap(), 0);
    }

    #[test]
    fn close_keeps_state() {
        let mut backend = backend();
        backend.write_register(0, 200, 7).unwrap();

        backend.close().unwrap();

        assert_eq!(backend.read_register(0, 200).unwrap(), 7);
    }

    #[test]
    fn errors_pass_through_trait_object() {
        let mut backend = backend();
        assert_eq!(
            backend.read_pin(20, 0).unwrap_err(),
            DeviceError::InstanceOutOfRange(20)
        );
        assert_eq!(backend.name(), "emulated");
    }
}
