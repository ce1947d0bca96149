// SPDX-License-Identifier: GPL-3.0-only

//! Ancestry resolution over crypto backing links.
//!
//! An unlocked encrypted volume has no drive of its own; it points at the
//! device it was unlocked from through `CryptoBackingDevice`. Following
//! those links ends at the device that actually sits on a drive.

use std::collections::HashMap;

use diskpick_types::{BlockDevice, Drive};

use crate::error::{CoreError, Result};

/// Read-only view over raw records keyed by object path.
pub struct AncestryResolver<'a> {
    devices: &'a [BlockDevice],
    index: &'a HashMap<String, usize>,
}

impl<'a> AncestryResolver<'a> {
    pub fn new(devices: &'a [BlockDevice], index: &'a HashMap<String, usize>) -> Self {
        Self { devices, index }
    }

    /// Drive that ultimately backs `device`, if any.
    ///
    /// Returns the first drive found walking the crypto backing chain
    /// starting at `device` itself.
    pub fn resolve_drive(&self, device: &'a BlockDevice) -> Result<Option<&'a Drive>> {
        let mut current = device;

        for _ in 0..=self.devices.len() {
            if let Some(drive) = current.drive.as_ref() {
                return Ok(Some(drive));
            }
            match self.backing_of(current, device)? {
                Some(backing) => current = backing,
                None => return Ok(None),
            }
        }

        Err(self.cycle(device))
    }

    /// Object path of the last device in the crypto backing chain of `device`.
    ///
    /// Drives are not consulted: a device with no backing device is its own root.
    pub fn resolve_root_device(&self, device: &'a BlockDevice) -> Result<&'a str> {
        let mut current = device;

        for _ in 0..=self.devices.len() {
            match self.backing_of(current, device)? {
                Some(backing) => current = backing,
                None => return Ok(&current.object_path),
            }
        }

        Err(self.cycle(device))
    }

    fn backing_of(
        &self,
        current: &BlockDevice,
        origin: &BlockDevice,
    ) -> Result<Option<&'a BlockDevice>> {
        let Some(backing) = current.crypto_backing() else {
            return Ok(None);
        };

        match self.index.get(backing) {
            Some(&i) => Ok(Some(&self.devices[i])),
            None => Err(CoreError::DanglingBackingReference {
                device: origin.object_path.clone(),
                backing: backing.to_string(),
            }),
        }
    }

    fn cycle(&self, origin: &BlockDevice) -> CoreError {
        CoreError::CyclicBackingChain {
            device: origin.object_path.clone(),
            depth: self.devices.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(path: &str, backing: Option<&str>, drive_model: Option<&str>) -> BlockDevice {
        let mut device = BlockDevice::new(path);
        device.crypto_backing_device = backing.map(ToString::to_string);
        device.drive = drive_model.map(|model| Drive {
            model: Some(model.to_string()),
            ..Drive::default()
        });
        device
    }

    fn index_of(devices: &[BlockDevice]) -> HashMap<String, usize> {
        devices
            .iter()
            .enumerate()
            .map(|(i, d)| (d.object_path.clone(), i))
            .collect()
    }

    #[test]
    fn follows_chain_to_drive_and_root() {
        let devices = vec![
            device("/c", Some("/b"), None),
            device("/b", Some("/a"), None),
            device("/a", Some("/"), Some("Samsung SSD")),
        ];
        let index = index_of(&devices);
        let resolver = AncestryResolver::new(&devices, &index);

        let drive = resolver.resolve_drive(&devices[0]).expect("resolve drive");
        assert_eq!(drive, devices[2].drive.as_ref());
        assert_eq!(resolver.resolve_root_device(&devices[0]).unwrap(), "/a");
        assert_eq!(resolver.resolve_root_device(&devices[2]).unwrap(), "/a");
    }

    #[test]
    fn device_without_drive_or_backing_is_its_own_root() {
        let devices = vec![device("/loop0", None, None)];
        let index = index_of(&devices);
        let resolver = AncestryResolver::new(&devices, &index);

        assert_eq!(resolver.resolve_drive(&devices[0]).unwrap(), None);
        assert_eq!(resolver.resolve_root_device(&devices[0]).unwrap(), "/loop0");
    }

    #[test]
    fn own_drive_wins_over_backing_device() {
        let devices = vec![
            device("/dm", Some("/sda2"), Some("Virtual")),
            device("/sda2", None, Some("Physical")),
        ];
        let index = index_of(&devices);
        let resolver = AncestryResolver::new(&devices, &index);

        let drive = resolver.resolve_drive(&devices[0]).unwrap().unwrap();
        assert_eq!(drive.model.as_deref(), Some("Virtual"));
        // Root device follows backing links regardless of drives
        assert_eq!(resolver.resolve_root_device(&devices[0]).unwrap(), "/sda2");
    }

    #[test]
    fn dangling_backing_reference_is_an_error() {
        let devices = vec![device("/dm", Some("/missing"), None)];
        let index = index_of(&devices);
        let resolver = AncestryResolver::new(&devices, &index);

        let expected = CoreError::DanglingBackingReference {
            device: "/dm".to_string(),
            backing: "/missing".to_string(),
        };
        assert_eq!(resolver.resolve_drive(&devices[0]), Err(expected.clone()));
        assert_eq!(resolver.resolve_root_device(&devices[0]), Err(expected));
    }

    #[test]
    fn cyclic_chain_is_an_error() {
        let devices = vec![device("/x", Some("/y"), None), device("/y", Some("/x"), None)];
        let index = index_of(&devices);
        let resolver = AncestryResolver::new(&devices, &index);

        assert!(matches!(
            resolver.resolve_drive(&devices[0]),
            Err(CoreError::CyclicBackingChain { .. })
        ));
        assert!(matches!(
            resolver.resolve_root_device(&devices[1]),
            Err(CoreError::CyclicBackingChain { device, .. }) if device == "/y"
        ));
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let devices = vec![device("/x", Some("/x"), None)];
        let index = index_of(&devices);
        let resolver = AncestryResolver::new(&devices, &index);

        assert!(matches!(
            resolver.resolve_root_device(&devices[0]),
            Err(CoreError::CyclicBackingChain { .. })
        ));
    }
}
